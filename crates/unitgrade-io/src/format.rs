//! Grid serialization formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported grid file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// A JSON report envelope; plain JSON arrays of rows are also read.
    Json,
    /// A markdown pipe table. Write-only.
    Markdown,
    /// An Excel workbook; the first sheet is read, an `Output` sheet written.
    Xlsx,
}

impl GridFormat {
    pub const ALL: [GridFormat; 4] = [
        GridFormat::Csv,
        GridFormat::Json,
        GridFormat::Markdown,
        GridFormat::Xlsx,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            GridFormat::Csv => "csv",
            GridFormat::Json => "json",
            GridFormat::Markdown => "md",
            GridFormat::Xlsx => "xlsx",
        }
    }

    /// Whether grids can be read back from this format.
    pub fn is_readable(&self) -> bool {
        !matches!(self, GridFormat::Markdown)
    }

    /// Pick a format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(GridFormat::Csv),
            "json" => Ok(GridFormat::Json),
            "md" | "markdown" => Ok(GridFormat::Markdown),
            "xlsx" => Ok(GridFormat::Xlsx),
            _ => Err(format!(
                "unsupported file type '{}', expected one of: {}",
                path.display(),
                supported_extensions()
            )),
        }
    }
}

fn supported_extensions() -> String {
    GridFormat::ALL
        .iter()
        .map(|f| format!(".{}", f.extension()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for GridFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridFormat::Csv => write!(f, "csv"),
            GridFormat::Json => write!(f, "json"),
            GridFormat::Markdown => write!(f, "markdown"),
            GridFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl FromStr for GridFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(GridFormat::Csv),
            "json" => Ok(GridFormat::Json),
            "markdown" | "md" => Ok(GridFormat::Markdown),
            "xlsx" | "excel" => Ok(GridFormat::Xlsx),
            other => Err(format!("unknown format: {other}")),
        }
    }
}
