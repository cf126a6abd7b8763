//! Student submissions and per-question verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{parse_decimal, GradingError};
use crate::format_number;
use crate::units::round_tenth;
use crate::worksheet::AnswerKey;

/// Grading outcome for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The question itself has no resolvable answer.
    Invalid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::Incorrect => "Incorrect",
            Verdict::Invalid => "Invalid",
        }
    }

    /// Decide one answer against one key entry.
    ///
    /// A blank response against a present key is `Incorrect`.
    pub fn decide(response: Option<f64>, key: Option<f64>) -> Self {
        match (key, response) {
            (None, _) => Verdict::Invalid,
            (Some(expected), Some(given)) if round_tenth(given) == expected => Verdict::Correct,
            (Some(_), _) => Verdict::Incorrect,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One student's answers and, once graded, their verdicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub student_name: String,
    pub responses: Vec<Option<f64>>,
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
}

impl Submission {
    /// Parse a whole batch; the first bad row fails it.
    pub fn batch_from_rows(rows: &[Vec<String>]) -> Result<Vec<Self>, GradingError> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| Self::from_row(idx + 1, row))
            .collect()
    }

    /// Parse `[name, response_1, ..., response_n]`. `row_no` is 1-based and
    /// only used in errors.
    pub fn from_row(row_no: usize, fields: &[String]) -> Result<Self, GradingError> {
        let (name, answers) = fields
            .split_first()
            .ok_or(GradingError::EmptySubmissionRow { row: row_no })?;

        let responses = answers
            .iter()
            .map(|raw| {
                if raw.trim().is_empty() {
                    return Ok(None);
                }
                parse_decimal(raw)
                    .map(Some)
                    .ok_or_else(|| GradingError::InvalidResponse {
                        row: row_no,
                        student: name.clone(),
                        value: raw.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            student_name: name.clone(),
            responses,
            verdicts: Vec::new(),
        })
    }

    pub fn response(&self, idx: usize) -> Option<f64> {
        self.responses.get(idx).copied().flatten()
    }

    pub fn verdict(&self, idx: usize) -> Option<Verdict> {
        self.verdicts.get(idx).copied()
    }

    pub fn is_graded(&self) -> bool {
        !self.verdicts.is_empty()
    }

    /// Compute one verdict per key entry, replacing any earlier grading.
    ///
    /// Responses beyond the key are ignored; a key entry with no response
    /// counts as a blank answer.
    pub fn grade(&mut self, key: &AnswerKey) {
        self.verdicts = key
            .iter()
            .enumerate()
            .map(|(idx, expected)| Verdict::decide(self.response(idx), expected))
            .collect();
    }

    /// Consuming form of [`Submission::grade`].
    pub fn graded(mut self, key: &AnswerKey) -> Self {
        self.grade(key);
        self
    }

    /// `[response, verdict]` for one question; ungraded questions have an
    /// empty verdict.
    pub fn to_row(&self, idx: usize) -> [String; 2] {
        [
            self.response(idx).map(format_number).unwrap_or_default(),
            self.verdict(idx)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ]
    }
}
