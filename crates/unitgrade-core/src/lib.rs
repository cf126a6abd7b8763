//! unitgrade-core: Unit conversion registry and worksheet grading engine.
//!
//! The core works on in-memory string grids only: a worksheet grid and a
//! submissions grid go in, a results grid comes out. Reading and writing
//! files is left to `unitgrade-io`.

pub mod engine;
pub mod error;
pub mod results;
pub mod submission;
pub mod units;
pub mod worksheet;

pub use engine::{grade_all, grade_all_concurrent, GradingObserver, NoopObserver};
pub use error::{ConversionError, GradingError};
pub use results::{Results, Tally};
pub use submission::{Submission, Verdict};
pub use units::{convert, Registry};
pub use worksheet::{AnswerKey, Question, Worksheet};

/// A rectangular, ordered collection of string rows.
pub type Grid = Vec<Vec<String>>;

/// Format a number with the shortest decimal that round-trips, without
/// exponent notation or trailing zeros.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
