//! Saved calculation summaries.
//!
//! Each screen keeps an append-only list of plain-text summaries. The text
//! layout is read back by earlier installs, so it must not change (note the
//! double space before "No." in the compound interest entry).

use thiserror::Error;

use crate::models::InputField;

/// Storage key of the compound interest history list.
pub const COMPOUND_HISTORY_KEY: &str = "CompoundInterestHistory";

/// Storage key of the mortgage history list.
pub const MORTGAGE_HISTORY_KEY: &str = "MortgageHistory";

/// Reasons a save is refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("One or More Input are Empty")]
    OneOrMoreFieldsEmpty,

    /// Exactly one field is blank: the user has not run the calculation yet.
    #[error("Please do calculate. Save Unsuccessful")]
    CalculateFirst,
}

/// Summary line for the compound interest screen, built from raw field text.
pub fn compound_entry(
    present: &str,
    future: &str,
    rate: &str,
    payments: &str,
) -> String {
    format!(
        "Present Value is {present}, Future Value is {future}, Interest Rate is {rate}%,  No. of Payment is {payments}"
    )
}

/// Summary line for the mortgage screen, built from raw field text.
pub fn mortgage_entry(
    amount: &str,
    rate: &str,
    payments: &str,
    payment: &str,
) -> String {
    format!(
        "Mortgage Amount is {amount}, Interest Rate is {rate}%, No. of Payment is {payments}, Payment is {payment}"
    )
}

/// Whitespace-only text counts as blank, the same as for the solvers.
fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn blank_count(texts: &[&str]) -> usize {
    texts.iter().filter(|t| is_blank(t)).count()
}

/// Compound interest saves need all four fields.
pub fn validate_compound_save(texts: [&str; 4]) -> Result<(), SaveError> {
    match blank_count(&texts) {
        0 => Ok(()),
        _ => Err(SaveError::OneOrMoreFieldsEmpty),
    }
}

/// Mortgage saves need all four fields; a single blank means the
/// calculation was skipped.
pub fn validate_mortgage_save(texts: [&str; 4]) -> Result<(), SaveError> {
    match blank_count(&texts) {
        0 => Ok(()),
        1 => Err(SaveError::CalculateFirst),
        _ => Err(SaveError::OneOrMoreFieldsEmpty),
    }
}

/// Appends one entry to a history list, leaving earlier entries untouched.
pub fn append_entry(
    history: &mut Vec<String>,
    entry: String,
) {
    history.push(entry);
}

/// Labels of the blank fields, for log messages.
pub fn blank_labels<F: InputField>(texts: [&str; 4]) -> Vec<&'static str> {
    F::ALL
        .into_iter()
        .zip(texts)
        .filter_map(|(field, text)| is_blank(text).then_some(field.label()))
        .collect()
}
