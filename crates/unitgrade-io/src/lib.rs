//! unitgrade-io: Grid files, report output and configuration.
//!
//! Moves the string grids consumed and produced by `unitgrade-core` to and
//! from CSV, JSON, markdown and Excel files.

pub mod config;
pub mod delimited;
pub mod format;
pub mod json;
pub mod table;
pub mod xlsx;

use std::path::Path;

use anyhow::{Context, Result};

use unitgrade_core::{Grid, Results};

pub use config::{load_config_from, UnitgradeConfig};
pub use format::GridFormat;
pub use json::GradeReport;

/// Read a grid, picking the format from the file extension.
pub fn read_grid(path: &Path) -> Result<Grid> {
    let format = GridFormat::from_path(path).map_err(|e| anyhow::anyhow!(e))?;
    read_grid_as(path, format)
}

pub fn read_grid_as(path: &Path, format: GridFormat) -> Result<Grid> {
    anyhow::ensure!(
        format.is_readable(),
        "cannot read grids from {format}: {}",
        path.display()
    );
    let grid = match format {
        GridFormat::Json => json::read_json_file(path)?,
        GridFormat::Xlsx => xlsx::read_xlsx(path)?,
        _ => delimited::read_csv_file(path)?,
    };
    tracing::debug!("read {} rows from {}", grid.len(), path.display());
    Ok(grid)
}

/// Write a bare grid. JSON output is wrapped in a [`GradeReport`].
pub fn write_grid(path: &Path, grid: &Grid, format: GridFormat) -> Result<()> {
    match format {
        GridFormat::Json => GradeReport::from_grid(grid.clone()).save_json(path)?,
        GridFormat::Csv => {
            create_parent(path)?;
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            delimited::write_csv(file, grid)
                .with_context(|| format!("failed to write CSV: {}", path.display()))?;
        }
        GridFormat::Markdown => {
            create_parent(path)?;
            std::fs::write(path, table::to_markdown(grid))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        GridFormat::Xlsx => {
            create_parent(path)?;
            xlsx::write_xlsx(path, grid)?;
        }
    }
    tracing::debug!("wrote {} rows to {}", grid.len(), path.display());
    Ok(())
}

/// Write graded results. JSON output carries per-student tallies.
pub fn write_results(path: &Path, results: &Results, format: GridFormat) -> Result<()> {
    match format {
        GridFormat::Json => GradeReport::new(results).save_json(path),
        _ => write_grid(path, &results.to_grid(), format),
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
