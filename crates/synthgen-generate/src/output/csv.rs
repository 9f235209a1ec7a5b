use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use synthgen_core::{Dataset, Value};

use crate::errors::GenerationError;

/// Write a dataset as CSV: one header row of field names, no index column.
///
/// Returns the number of bytes written.
pub fn write_dataset_csv<W: Write>(
    writer: W,
    dataset: &Dataset,
) -> Result<u64, GenerationError> {
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(dataset.column_names())?;

    for index in 0..dataset.num_rows() {
        let record: Vec<String> = dataset
            .columns()
            .iter()
            .map(|column| column.values.get(index).map(format_cell).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

pub fn write_dataset_csv_path(path: &Path, dataset: &Dataset) -> Result<u64, GenerationError> {
    let file = File::create(path)?;
    write_dataset_csv(BufWriter::new(file), dataset)
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Float(value) if value.is_finite() && value.fract() == 0.0 => format!("{value:.1}"),
        other => other.to_string(),
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
