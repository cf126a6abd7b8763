//! JSON grids and the graded-results report envelope.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unitgrade_core::{Grid, Results, Tally};

/// A results grid with run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
    pub student_count: usize,
    /// Per-student verdict counts.
    #[serde(default)]
    pub tallies: Vec<Tally>,
    /// The results grid, header row first.
    pub grid: Grid,
}

impl GradeReport {
    pub fn new(results: &Results) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            question_count: results.worksheet.len(),
            student_count: results.submissions.len(),
            tallies: results.tallies(),
            grid: results.to_grid(),
        }
    }

    /// Wrap a bare grid. Counts are derived from its shape.
    pub fn from_grid(grid: Grid) -> Self {
        let question_count = grid.len().saturating_sub(1);
        let student_count = grid
            .first()
            .map(|header| header.len().saturating_sub(5) / 2)
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            question_count,
            student_count,
            tallies: Vec::new(),
            grid,
        }
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }
}

/// Either a report envelope or a bare array of string rows.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonGrid {
    Report(GradeReport),
    Rows(Grid),
}

/// Parse a JSON grid. Accepts a [`GradeReport`] or `[["a", "b"], ...]`.
pub fn parse_json_grid(content: &str) -> Result<Grid> {
    let parsed: JsonGrid = serde_json::from_str(content)
        .context("expected a JSON array of string rows or a grade report")?;
    Ok(match parsed {
        JsonGrid::Report(report) => report.grid,
        JsonGrid::Rows(rows) => rows,
    })
}

pub fn read_json_file(path: &Path) -> Result<Grid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_json_grid(&content).with_context(|| format!("failed to parse {}", path.display()))
}
