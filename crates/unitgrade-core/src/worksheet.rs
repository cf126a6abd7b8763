//! Worksheet model: typed questions and their answer key.

use serde::{Deserialize, Serialize};

use crate::error::{parse_decimal, GradingError};
use crate::units::{normalize_unit, Registry};
use crate::{format_number, Grid};

/// Fields in a worksheet row: input value, source unit, target unit.
pub const QUESTION_FIELDS: usize = 3;

/// One worksheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub input: f64,
    pub from_unit: String,
    pub to_unit: String,
    /// `None` when the unit pair cannot be converted.
    pub correct_answer: Option<f64>,
}

impl Question {
    /// Whether the registry could produce an answer for this question.
    pub fn is_answerable(&self) -> bool {
        self.correct_answer.is_some()
    }

    /// `[input, from, to, answer]`, with an empty answer when unanswerable.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            format_number(self.input),
            self.from_unit.clone(),
            self.to_unit.clone(),
            self.correct_answer.map(format_number).unwrap_or_default(),
        ]
    }
}

/// The ordered correct answers of a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerKey(Vec<Option<f64>>);

impl AnswerKey {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Option<f64>>> for AnswerKey {
    fn from(entries: Vec<Option<f64>>) -> Self {
        Self(entries)
    }
}

/// An ordered, immutable set of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    questions: Vec<Question>,
}

impl Worksheet {
    /// Build a worksheet with the standard registry.
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Self, GradingError> {
        Self::from_rows_with(rows, Registry::standard())
    }

    /// Build a worksheet, computing each answer with `registry`.
    ///
    /// A malformed row fails the whole build. An unsupported unit pair only
    /// leaves that question's answer absent.
    pub fn from_rows_with(rows: &[Vec<String>], registry: &Registry) -> Result<Self, GradingError> {
        let questions = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| build_question(idx + 1, row, registry))
            .collect::<Result<Vec<_>, _>>()?;

        let unanswerable = questions.iter().filter(|q| !q.is_answerable()).count();
        tracing::debug!(
            questions = questions.len(),
            unanswerable,
            "built worksheet"
        );

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn key(&self) -> AnswerKey {
        AnswerKey(self.questions.iter().map(|q| q.correct_answer).collect())
    }

    /// One `[input, from, to, answer]` row per question.
    pub fn to_grid(&self) -> Grid {
        self.questions.iter().map(Question::to_row).collect()
    }
}

fn build_question(
    row_no: usize,
    fields: &[String],
    registry: &Registry,
) -> Result<Question, GradingError> {
    if fields.len() != QUESTION_FIELDS {
        return Err(GradingError::WorksheetFieldCount {
            row: row_no,
            expected: QUESTION_FIELDS,
            found: fields.len(),
        });
    }

    let raw_input = fields[0].as_str();
    let input = parse_decimal(raw_input).ok_or_else(|| GradingError::InvalidInput {
        row: row_no,
        value: raw_input.to_string(),
    })?;
    let from_unit = normalize_unit(&fields[1]);
    let to_unit = normalize_unit(&fields[2]);

    let correct_answer = match registry.convert(&from_unit, &to_unit, input) {
        Ok(answer) => Some(answer),
        Err(e) => {
            tracing::debug!("worksheet row {row_no} has no answer: {e}");
            None
        }
    };

    Ok(Question {
        input,
        from_unit,
        to_unit,
        correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn sample() -> Vec<Vec<String>> {
        rows(&[
            &["1.10", "liters", "cups"],
            &["2.20", "tablespoons", "cubic inches"],
            &["3.30", "gallons", "liters"],
            &["4.40", "cups", "liters"],
            &["5.50", "cubic feet", "gallons"],
        ])
    }

    #[test]
    fn builds_questions_and_key() {
        let ws = Worksheet::from_rows(&sample()).unwrap();
        assert_eq!(ws.len(), 5);

        let key = ws.key();
        assert_eq!(key.len(), 5);
        assert!(key.iter().all(|a| a.is_some()));
        assert_eq!(key.get(0), Some(4.6));
        assert_eq!(key.get(2), Some(12.5));
    }

    #[test]
    fn non_numeric_input_fails_the_build() {
        let mut data = sample();
        data[0][0] = "NOT A NUMBER".into();
        let err = Worksheet::from_rows(&data).unwrap_err();
        assert_eq!(
            err,
            GradingError::InvalidInput {
                row: 1,
                value: "NOT A NUMBER".into(),
            }
        );
    }

    #[test]
    fn wrong_field_count_fails_the_build() {
        let mut data = sample();
        data[3].push("invalid question part.".into());
        let err = Worksheet::from_rows(&data).unwrap_err();
        assert_eq!(
            err,
            GradingError::WorksheetFieldCount {
                row: 4,
                expected: 3,
                found: 4,
            }
        );

        let short = rows(&[&["1.0", "kelvin"]]);
        assert!(Worksheet::from_rows(&short).is_err());
    }

    #[test]
    fn unsupported_pairs_leave_answers_absent() {
        let data = rows(&[
            &["1.1", "not a unit", "liters"],
            &["1.2", "also not a unit", "Kelvin"],
            &["1.3", "celsius", "kelvin"],
        ]);
        let ws = Worksheet::from_rows(&data).unwrap();
        let key = ws.key();
        assert_eq!(key.len(), 3);
        assert_eq!(key.get(0), None);
        assert_eq!(key.get(1), None);
        assert_eq!(key.get(2), Some(274.5));
        assert!(!ws.questions()[0].is_answerable());
    }

    #[test]
    fn units_are_normalized_on_entry() {
        let data = rows(&[&["1", "  Cubic Feet ", "CUBIC   INCHES"]]);
        let ws = Worksheet::from_rows(&data).unwrap();
        let q = &ws.questions()[0];
        assert_eq!(q.from_unit, "cubic feet");
        assert_eq!(q.to_unit, "cubic inches");
        assert_eq!(q.correct_answer, Some(1728.0));
    }

    #[test]
    fn question_rows() {
        let q = Question {
            input: 123.123,
            from_unit: "kelvin".into(),
            to_unit: "celsius".into(),
            correct_answer: Some(-150.0),
        };
        assert_eq!(q.to_row(), vec!["123.123", "kelvin", "celsius", "-150"]);

        let q = Question {
            input: 1.10,
            from_unit: "not a unit".into(),
            to_unit: "also not a unit".into(),
            correct_answer: None,
        };
        assert_eq!(q.to_row(), vec!["1.1", "not a unit", "also not a unit", ""]);
    }

    #[test]
    fn empty_grid_is_an_empty_worksheet() {
        let ws = Worksheet::from_rows(&[]).unwrap();
        assert!(ws.is_empty());
        assert!(ws.key().is_empty());
        assert!(ws.to_grid().is_empty());
    }
}
