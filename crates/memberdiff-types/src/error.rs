use std::fmt;

use thiserror::Error;

/// Contract violations raised while comparing two values.
///
/// A structural difference is never an error; it is reported as a
/// [`DifferenceRecord`](crate::DifferenceRecord). These variants describe
/// misuse of the comparison and always abort it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    /// A computed property failed while its value was being read.
    #[error("getter for member `{member}` failed: {message}")]
    Getter { member: String, message: String },

    /// A record was rendered whose left value is null.
    #[error("cannot render `{member}`: left value is null")]
    NullLeftValue { member: String },

    /// The same pair of values was reached again while still being compared.
    #[error("cycle detected while comparing `{type_name}`")]
    CycleDetected { type_name: String },

    /// Nesting went deeper than the configured limit.
    #[error("comparison exceeded the maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompareError {
    /// Wrap a getter failure for `member`.
    pub fn getter(member: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::Getter {
            member: member.into(),
            message: cause.to_string(),
        }
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
