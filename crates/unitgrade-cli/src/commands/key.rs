//! The `unitgrade key` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use unitgrade_core::results::HEADER;
use unitgrade_core::{Grid, Worksheet};
use unitgrade_io::table::render_table;
use unitgrade_io::{read_grid, write_grid, GridFormat};

pub fn execute(worksheet_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let grid = read_grid(&worksheet_path)?;
    let worksheet = Worksheet::from_rows(&grid)
        .with_context(|| format!("invalid worksheet {}", worksheet_path.display()))?;

    let key_grid = with_header(worksheet.to_grid());
    println!("{}", render_table(&key_grid));

    let unanswerable = worksheet
        .questions()
        .iter()
        .filter(|q| !q.is_answerable())
        .count();
    if unanswerable > 0 {
        eprintln!("{unanswerable} question(s) have no answer: unsupported conversion");
    }

    if let Some(path) = output {
        let format = GridFormat::from_path(&path).map_err(anyhow::Error::msg)?;
        write_grid(&path, &key_grid, format)?;
        eprintln!("Key saved to: {}", path.display());
    }

    Ok(())
}

fn with_header(rows: Grid) -> Grid {
    let header = HEADER[..4].iter().map(|h| h.to_string()).collect();
    std::iter::once(header).chain(rows).collect()
}
