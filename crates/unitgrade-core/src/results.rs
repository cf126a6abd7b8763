//! Result projection: worksheet, key and graded submissions as one grid.

use serde::{Deserialize, Serialize};

use crate::submission::{Submission, Verdict};
use crate::worksheet::Worksheet;
use crate::Grid;

/// Header cells preceding the per-student columns.
pub const HEADER: [&str; 5] = ["Input", "From Unit", "To Unit", "Correct Answer", ""];

/// Columns each student occupies: response, verdict.
pub const COLUMNS_PER_STUDENT: usize = 2;

/// A worksheet with its graded submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub worksheet: Worksheet,
    pub submissions: Vec<Submission>,
}

/// Verdict counts for one student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub student_name: String,
    pub correct: usize,
    pub incorrect: usize,
    pub invalid: usize,
    /// Answerable questions left blank (also counted as incorrect).
    pub blank: usize,
}

impl Results {
    pub fn new(worksheet: Worksheet, submissions: Vec<Submission>) -> Self {
        Self {
            worksheet,
            submissions,
        }
    }

    /// Total width of every grid row.
    pub fn width(&self) -> usize {
        HEADER.len() + COLUMNS_PER_STUDENT * self.submissions.len()
    }

    /// Header row plus one row per question.
    pub fn to_grid(&self) -> Grid {
        let width = self.width();
        let mut grid = Vec::with_capacity(self.worksheet.len() + 1);

        let mut header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
        for submission in &self.submissions {
            header.push(submission.student_name.clone());
            header.resize(header.len() + COLUMNS_PER_STUDENT - 1, String::new());
        }
        grid.push(header);

        for (idx, question) in self.worksheet.questions().iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            row.extend(question.to_row());
            row.resize(HEADER.len(), String::new());
            for submission in &self.submissions {
                row.extend(submission.to_row(idx));
            }
            grid.push(row);
        }

        for row in &mut grid {
            debug_assert!(row.len() <= width);
            row.resize(width, String::new());
        }
        grid
    }

    pub fn tallies(&self) -> Vec<Tally> {
        self.submissions
            .iter()
            .map(|s| {
                let mut tally = Tally {
                    student_name: s.student_name.clone(),
                    ..Default::default()
                };
                for (idx, verdict) in s.verdicts.iter().enumerate() {
                    match verdict {
                        Verdict::Correct => tally.correct += 1,
                        Verdict::Incorrect => {
                            tally.incorrect += 1;
                            if s.response(idx).is_none() {
                                tally.blank += 1;
                            }
                        }
                        Verdict::Invalid => tally.invalid += 1,
                    }
                }
                tally
            })
            .collect()
    }
}
