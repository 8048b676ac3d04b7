//! Grading error types.
//!
//! Structural problems with exercise content abort a scoring attempt and are
//! surfaced as a single failure. Per-item anomalies (an unanswered blank, a
//! half-filled zone) never show up here; they are absorbed by the extractor
//! and the zone resolver and only lower the score.

use thiserror::Error;

/// Content that cannot be turned into a typed exercise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The exercise-type tag is not one the engine knows how to score.
    #[error("unsupported exercise type: {0}")]
    UnsupportedType(String),

    /// The content record is not a JSON object (or a string holding one).
    #[error("content is not a JSON object: {0}")]
    NotAnObject(String),

    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Text-with-blanks content carries neither `words` nor `available_words`.
    #[error("missing answer key list (expected `words` or `available_words`)")]
    MissingAnswerKeys,

    /// A field is present but has the wrong shape.
    #[error("malformed field `{field}`: {reason}")]
    Malformed { field: String, reason: String },

    /// A stored correct-choice index points past the end of the choices.
    #[error("question {question}: correct index {index} out of range for {choices} choice(s)")]
    CorrectIndexOutOfRange {
        question: usize,
        index: usize,
        choices: usize,
    },

    /// There are more blank markers than correct words.
    #[error("{blanks} blank marker(s) but only {words} correct word(s)")]
    BlankCountMismatch { blanks: usize, words: usize },

    /// `correct_order` is not a permutation of the draggable items.
    #[error("invalid correct_order: {0}")]
    InvalidOrder(String),

    /// Left and right pair sequences differ in length.
    #[error("pairs have {left} left item(s) but {right} right item(s)")]
    UnevenPairs { left: usize, right: usize },

    /// Two zones share the same id.
    #[error("duplicate zone id {0}")]
    DuplicateZoneId(u32),

    /// A zone stored without an id cannot get one because the largest id
    /// is already `u32::MAX`.
    #[error("zones[{0}] has no id and none is left above the largest zone id")]
    ZoneIdExhausted(usize),
}

impl ValidationError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::Malformed {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort grading a submission.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The stored content failed validation.
    #[error("invalid exercise content: {0}")]
    Validation(#[from] ValidationError),

    /// The content source could not supply the exercise.
    #[error("exercise {id} unavailable: {source:#}")]
    ContentUnavailable {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The persistence sink rejected the result.
    #[error("failed to record score for exercise {id}: {source:#}")]
    SinkFailed {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The legend editing path was invoked on a non-legend exercise.
    #[error("exercise type {0} has no zones to edit")]
    NotALegend(String),
}

impl GradeError {
    /// The message shown to a learner. Structural failures all look alike.
    pub fn user_message(&self) -> &'static str {
        "this exercise could not be scored"
    }

    /// Returns `true` if the failure comes from the exercise content itself,
    /// so retrying with the same content cannot succeed.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            GradeError::Validation(_) | GradeError::NotALegend(_)
        )
    }
}
