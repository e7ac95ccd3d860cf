use std::io::Write;

use serde::Serialize;

use crate::errors::{CalcError, Result};
use crate::record::Record;
use crate::views::RecordView;

/// receives a record and its rendered view to produce a document
pub trait DocumentExporter {
    fn export(&mut self, record: &Record, view: &RecordView) -> Result<()>;
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    view: &'a RecordView,
    record: &'a Record,
}

/// writes each exported record as a pretty-printed json document
pub struct JsonExporter<W: Write> {
    writer: W,
    exported: usize,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, exported: 0 }
    }

    /// number of documents written so far
    pub fn exported(&self) -> usize {
        self.exported
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DocumentExporter for JsonExporter<W> {
    fn export(&mut self, record: &Record, view: &RecordView) -> Result<()> {
        let document = ExportDocument { view, record };
        let export_err = |message: String| CalcError::Export { message };

        serde_json::to_writer_pretty(&mut self.writer, &document)
            .map_err(|e| export_err(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .map_err(|e| export_err(e.to_string()))?;

        self.exported += 1;
        tracing::debug!(id = %record.id, "record exported as json");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::payments::compute_emi;
    use crate::types::{RecordId, TenureUnit};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn record() -> Record {
        let emi = compute_emi(Money::from_major(120_000), dec!(9), dec!(1), TenureUnit::Years).unwrap();
        Record::new(RecordId::new(7), Utc::now(), emi.into())
    }

    #[test]
    fn test_json_export() {
        let record = record();
        let view = RecordView::from_record(&record, "INR");
        let mut exporter = JsonExporter::new(Vec::new());

        exporter.export(&record, &view).unwrap();
        assert_eq!(exporter.exported(), 1);

        let bytes = exporter.into_inner();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["record"]["result"]["kind"], "emi");
        assert_eq!(value["view"]["kind"], "EMI");
    }

    #[test]
    fn test_write_failure_is_export_error() {
        let record = record();
        let view = RecordView::from_record(&record, "INR");
        let mut exporter = JsonExporter::new(FailingWriter);

        let err = exporter.export(&record, &view).unwrap_err();
        assert!(matches!(err, CalcError::Export { .. }));
        assert_eq!(exporter.exported(), 0);
    }
}
