//! Comma-separated grid files.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use unitgrade_core::Grid;

/// Read every record as a row. Record lengths may differ; shape checks belong
/// to the worksheet and submission builders.
pub fn read_csv<R: Read>(reader: R) -> Result<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    rdr.records()
        .map(|record| -> Result<Vec<String>> {
            let record = record.context("malformed CSV record")?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

pub fn read_csv_file(path: &Path) -> Result<Grid> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_csv(file).with_context(|| format!("failed to read CSV: {}", path.display()))
}

pub fn write_csv<W: Write>(writer: W, grid: &Grid) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for row in grid {
        wtr.write_record(row).context("failed to write CSV record")?;
    }
    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}
