//! Excel workbook grids.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use unitgrade_core::Grid;

/// Name of the sheet written by [`write_xlsx`].
pub const OUTPUT_SHEET: &str = "Output";

/// Read the first sheet as a grid.
///
/// Cells are rendered as text. Trailing empty cells are dropped from each row,
/// so ragged rows behave as they do in CSV.
pub fn read_xlsx(path: &Path) -> Result<Grid> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("workbook has no sheets: {}", path.display()))?
        .with_context(|| format!("failed to read first sheet of {}", path.display()))?;

    // The range starts at the first used cell, not at A1.
    let (skip_rows, skip_cols) = range.start().unwrap_or((0, 0));
    let mut grid: Grid = vec![Vec::new(); skip_rows as usize];
    for row in range.rows() {
        let mut cells: Vec<String> = std::iter::repeat(String::new())
            .take(skip_cols as usize)
            .chain(row.iter().map(|cell| cell.to_string()))
            .collect();
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        grid.push(cells);
    }
    Ok(grid)
}

/// Write a grid to a single [`OUTPUT_SHEET`] sheet, every cell as text.
pub fn write_xlsx(path: &Path, grid: &Grid) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(OUTPUT_SHEET)?;

    for (r, row) in grid.iter().enumerate() {
        let r = u32::try_from(r).context("too many rows for a worksheet")?;
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let c = u16::try_from(c).context("too many columns for a worksheet")?;
            sheet
                .write_string(r, c, cell)
                .with_context(|| format!("failed to write cell ({r}, {c})"))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save workbook {}", path.display()))?;
    Ok(())
}
