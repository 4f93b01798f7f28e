//! Compound interest solver.
//!
//! Interest compounds monthly: the nominal annual rate is divided by 12 and
//! the term, given in years, is multiplied by 12.
//!
//! # Formulas
//!
//! With `r` the annual rate as a decimal (percent ÷ 100):
//!
//! | Unknown | Formula |
//! |---------|---------|
//! | present value `P` | `F / (1 + r/12)^(12t)` |
//! | future value `F`  | `P (1 + r/12)^(12t)` |
//! | rate (percent)    | `12 [(F/P)^(1/(12t)) − 1] × 100` |
//! | term `t`          | `ln(F/P) / (12 ln(1 + r/12))` |
//!
//! # Example
//!
//! ```
//! use finance_core::CompoundField;
//! use finance_core::calculations::{CompoundInterestInput, CompoundInterestSolver};
//!
//! let input = CompoundInterestInput {
//!     present_value: Some(1000.0),
//!     future_value: None,
//!     interest_rate: Some(5.0),
//!     no_of_payments: Some(10.0),
//! };
//!
//! let solution = CompoundInterestSolver::new().calculate(&input).unwrap();
//!
//! assert_eq!(solution.field, CompoundField::FutureValue);
//! assert_eq!(solution.display_value(), "1647.01");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::MONTHS_PER_YEAR;
use crate::calculations::solve::{Solution, SolveError, parse_field, select_unknown};
use crate::models::{CompoundField, InputField};

/// Inputs of the compound interest screen. `None` marks a blank field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub present_value: Option<f64>,
    pub future_value: Option<f64>,
    /// Nominal annual rate, in percent.
    pub interest_rate: Option<f64>,
    /// Term in years.
    pub no_of_payments: Option<f64>,
}

impl CompoundInterestInput {
    /// Parses the raw text of the four fields, in [`CompoundField::ALL`] order.
    pub fn from_texts(texts: [&str; 4]) -> Result<Self, SolveError> {
        let [present, future, rate, payments] = texts;
        Ok(Self {
            present_value: parse_field(CompoundField::PresentValue, present)?,
            future_value: parse_field(CompoundField::FutureValue, future)?,
            interest_rate: parse_field(CompoundField::InterestRate, rate)?,
            no_of_payments: parse_field(CompoundField::NoOfPayments, payments)?,
        })
    }

    pub fn get(
        &self,
        field: CompoundField,
    ) -> Option<f64> {
        match field {
            CompoundField::PresentValue => self.present_value,
            CompoundField::FutureValue => self.future_value,
            CompoundField::InterestRate => self.interest_rate,
            CompoundField::NoOfPayments => self.no_of_payments,
        }
    }

    fn values(&self) -> [Option<f64>; 4] {
        CompoundField::ALL.map(|field| self.get(field))
    }
}

/// Solves the compound interest relation for whichever field is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundInterestSolver;

impl CompoundInterestSolver {
    pub fn new() -> Self {
        Self
    }

    /// Finds the blank field and evaluates its formula.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] unless exactly one field is blank. Degenerate
    /// inputs (zero present value, zero term) are not rejected; the result
    /// is then infinite or NaN.
    pub fn calculate(
        &self,
        input: &CompoundInterestInput,
    ) -> Result<Solution<CompoundField>, SolveError> {
        let unknown = select_unknown::<CompoundField>(&input.values())?;

        let present = input.present_value.unwrap_or_default();
        let future = input.future_value.unwrap_or_default();
        let rate = input.interest_rate.unwrap_or_default();
        let years = input.no_of_payments.unwrap_or_default();

        let value = match unknown {
            CompoundField::PresentValue => present_value(future, rate, years),
            CompoundField::FutureValue => future_value(present, rate, years),
            CompoundField::InterestRate => interest_rate(present, future, years),
            CompoundField::NoOfPayments => no_of_payments(present, future, rate),
        };

        debug!(field = ?unknown, value, "solved compound interest");
        Ok(Solution {
            field: unknown,
            value,
        })
    }
}

/// Growth factor over the whole term: `(1 + r/12)^(12t)`.
fn growth(
    rate_percent: f64,
    years: f64,
) -> f64 {
    (1.0 + rate_percent / 100.0 / MONTHS_PER_YEAR).powf(MONTHS_PER_YEAR * years)
}

pub fn present_value(
    future: f64,
    rate_percent: f64,
    years: f64,
) -> f64 {
    future / growth(rate_percent, years)
}

pub fn future_value(
    present: f64,
    rate_percent: f64,
    years: f64,
) -> f64 {
    present * growth(rate_percent, years)
}

/// Annual rate in percent.
pub fn interest_rate(
    present: f64,
    future: f64,
    years: f64,
) -> f64 {
    let monthly = (future / present).powf(1.0 / (MONTHS_PER_YEAR * years)) - 1.0;
    MONTHS_PER_YEAR * monthly * 100.0
}

/// Term in years.
pub fn no_of_payments(
    present: f64,
    future: f64,
    rate_percent: f64,
) -> f64 {
    (future / present).ln() / (MONTHS_PER_YEAR * (1.0 + rate_percent / 100.0 / MONTHS_PER_YEAR).ln())
}
