//! Pieces shared by every solver: input parsing, the blank-field selection
//! rule, the solved value and the error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::format_two_places;
use crate::models::InputField;

/// Errors that stop a solve before any formula is evaluated.
///
/// Non-finite results are not errors; they come back inside [`Solution`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolveError {
    /// Every field is blank.
    #[error("Please enter value(s) to calculate")]
    AllFieldsEmpty,

    /// No field is blank, so there is nothing to solve for.
    #[error("Need one empty field.")]
    AllFieldsFilled,

    /// Two or three fields are blank.
    #[error("Please enter value(s) to calculate")]
    TooManyEmptyFields { empty: usize },

    /// The blank field has no formula on this calculator.
    #[error("{field} calculation is not defined.")]
    UnsupportedSolve { field: &'static str },

    /// A filled field does not hold a number.
    #[error("{field} is not a valid number: '{input}'")]
    InvalidNumber { field: &'static str, input: String },
}

/// The value computed for the one blank field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solution<F> {
    pub field: F,
    pub value: f64,
}

impl<F> Solution<F> {
    /// The value as it is written back into the field: two decimal places.
    pub fn display_value(&self) -> String {
        format_two_places(self.value)
    }

    /// `false` when a degenerate input produced infinity or NaN.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

/// Parses the raw text of a field.
///
/// Blank (or whitespace-only) text is the unknown and yields `None`.
pub fn parse_field<F: InputField>(
    field: F,
    text: &str,
) -> Result<Option<f64>, SolveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| SolveError::InvalidNumber {
            field: field.label(),
            input: text.to_string(),
        })
}

/// Picks the field to solve for.
///
/// `values` is indexed like [`InputField::ALL`]. Exactly one entry must be
/// `None`.
pub fn select_unknown<F: InputField>(values: &[Option<f64>; 4]) -> Result<F, SolveError> {
    let blanks: Vec<F> = F::ALL
        .into_iter()
        .zip(values.iter())
        .filter_map(|(field, value)| value.is_none().then_some(field))
        .collect();

    match blanks.as_slice() {
        [] => Err(SolveError::AllFieldsFilled),
        [unknown] => Ok(*unknown),
        _ if blanks.len() == F::ALL.len() => Err(SolveError::AllFieldsEmpty),
        _ => Err(SolveError::TooManyEmptyFields {
            empty: blanks.len(),
        }),
    }
}
