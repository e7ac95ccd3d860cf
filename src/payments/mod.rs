pub mod amortization;
pub mod emi;

pub use amortization::{
    generate_schedule, AmortizationRow, AmortizationSchedule, AmortizationSummary, SchedulePage,
};
pub use emi::{calculate_emi, compute_emi, compute_emi_for, EmiResult};
