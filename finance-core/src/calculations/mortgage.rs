//! Mortgage solver.
//!
//! A fixed-rate loan repaid in equal monthly payments. `t` is the total
//! number of payments and `i` the monthly rate (annual percent ÷ 100 ÷ 12).
//!
//! | Unknown | Formula |
//! |---------|---------|
//! | payment `M`        | `P i(1+i)^t / ((1+i)^t − 1)` |
//! | amount `P`         | `M ((1+j)^t − 1) / (j (1+j)^t)` with `j = r/t` |
//! | rate               | not supported |
//! | payments `t`       | `ln((M/i) / (M/i − P)) / ln(1+i)` |
//!
//! The amount formula uses the annual rate divided by the number of payments
//! for its periodic rate, not by 12. This matches the figures users already
//! have in their saved history and is kept until confirmed as a defect.
//!
//! # Example
//!
//! ```
//! use finance_core::MortgageField;
//! use finance_core::calculations::{MortgageInput, MortgageSolver};
//!
//! let input = MortgageInput {
//!     amount: Some(100000.0),
//!     interest_rate: Some(5.0),
//!     no_of_payments: Some(360.0),
//!     payment: None,
//! };
//!
//! let solution = MortgageSolver::new().calculate(&input).unwrap();
//!
//! assert_eq!(solution.field, MortgageField::Payment);
//! assert_eq!(solution.display_value(), "536.82");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::monthly_rate;
use crate::calculations::solve::{Solution, SolveError, parse_field, select_unknown};
use crate::models::{InputField, MortgageField};

/// Inputs of the mortgage screen. `None` marks a blank field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub amount: Option<f64>,
    /// Nominal annual rate, in percent.
    pub interest_rate: Option<f64>,
    pub no_of_payments: Option<f64>,
    pub payment: Option<f64>,
}

impl MortgageInput {
    /// Parses the raw text of the four fields, in [`MortgageField::ALL`] order.
    pub fn from_texts(texts: [&str; 4]) -> Result<Self, SolveError> {
        let [amount, rate, payments, payment] = texts;
        Ok(Self {
            amount: parse_field(MortgageField::Amount, amount)?,
            interest_rate: parse_field(MortgageField::InterestRate, rate)?,
            no_of_payments: parse_field(MortgageField::NoOfPayments, payments)?,
            payment: parse_field(MortgageField::Payment, payment)?,
        })
    }

    pub fn get(
        &self,
        field: MortgageField,
    ) -> Option<f64> {
        match field {
            MortgageField::Amount => self.amount,
            MortgageField::InterestRate => self.interest_rate,
            MortgageField::NoOfPayments => self.no_of_payments,
            MortgageField::Payment => self.payment,
        }
    }

    fn values(&self) -> [Option<f64>; 4] {
        MortgageField::ALL.map(|field| self.get(field))
    }
}

/// Solves the loan relation for whichever field is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct MortgageSolver;

impl MortgageSolver {
    pub fn new() -> Self {
        Self
    }

    /// Finds the blank field and evaluates its formula.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] unless exactly one field is blank, and
    /// [`SolveError::UnsupportedSolve`] when that field is the rate.
    pub fn calculate(
        &self,
        input: &MortgageInput,
    ) -> Result<Solution<MortgageField>, SolveError> {
        let unknown = select_unknown::<MortgageField>(&input.values())?;

        let amount = input.amount.unwrap_or_default();
        let rate = input.interest_rate.unwrap_or_default();
        let payments = input.no_of_payments.unwrap_or_default();
        let monthly = input.payment.unwrap_or_default();

        let value = match unknown {
            MortgageField::Payment => payment(amount, rate, payments),
            MortgageField::Amount => amount_from_payment(monthly, rate, payments),
            MortgageField::NoOfPayments => no_of_payments(amount, rate, monthly),
            MortgageField::InterestRate => {
                warn!("rate solve requested on mortgage screen");
                return Err(SolveError::UnsupportedSolve {
                    field: "Interest rate",
                });
            }
        };

        debug!(field = ?unknown, value, "solved mortgage");
        Ok(Solution {
            field: unknown,
            value,
        })
    }
}

/// Monthly payment.
pub fn payment(
    amount: f64,
    rate_percent: f64,
    payments: f64,
) -> f64 {
    let i = monthly_rate(rate_percent);
    let growth = (1.0 + i).powf(payments);
    amount * (i * growth) / (growth - 1.0)
}

/// Loan amount, with the periodic rate taken as `rate / payments`.
pub fn amount_from_payment(
    payment: f64,
    rate_percent: f64,
    payments: f64,
) -> f64 {
    let j = rate_percent / 100.0 / payments;
    let growth = (1.0 + j).powf(payments);
    payment * (growth - 1.0) / (j * growth)
}

/// Number of monthly payments.
pub fn no_of_payments(
    amount: f64,
    rate_percent: f64,
    payment: f64,
) -> f64 {
    let i = monthly_rate(rate_percent);
    let per_rate = payment / i;
    (per_rate / (per_rate - amount)).ln() / (1.0 + i).ln()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn solve(input: MortgageInput) -> Result<Solution<MortgageField>, SolveError> {
        MortgageSolver::new().calculate(&input)
    }

    #[test]
    fn solves_thirty_year_payment() {
        let solution = solve(MortgageInput {
            amount: Some(100000.0),
            interest_rate: Some(5.0),
            no_of_payments: Some(360.0),
            payment: None,
        })
        .unwrap();

        assert_eq!(solution.field, MortgageField::Payment);
        assert_eq!(solution.display_value(), "536.82");
    }

    #[test]
    fn solves_number_of_payments() {
        let solution = solve(MortgageInput {
            amount: Some(100000.0),
            interest_rate: Some(5.0),
            no_of_payments: None,
            payment: Some(536.8216),
        })
        .unwrap();

        assert_eq!(solution.field, MortgageField::NoOfPayments);
        assert_eq!(solution.display_value(), "360.00");
    }

    #[test]
    fn amount_uses_rate_over_payment_count() {
        // With j = r/t and t = 12 the formula matches the standard annuity
        // at the monthly rate, so the 12-payment case must invert payment().
        let monthly = payment(1200.0, 6.0, 12.0);

        let solution = solve(MortgageInput {
            amount: None,
            interest_rate: Some(6.0),
            no_of_payments: Some(12.0),
            payment: Some(monthly),
        })
        .unwrap();

        assert_eq!(solution.field, MortgageField::Amount);
        assert_eq!(solution.display_value(), "1200.00");
    }

    #[test]
    fn amount_diverges_from_monthly_annuity_for_long_terms() {
        let value = amount_from_payment(536.82, 5.0, 360.0);

        // j = 0.05 / 360 rather than 0.05 / 12.
        let j: f64 = 0.05 / 360.0;
        let growth = (1.0 + j).powf(360.0);
        let expected = 536.82 * (growth - 1.0) / (j * growth);

        assert!((value - expected).abs() < 1e-9);
        assert!(value > 100000.0);
    }

    #[test]
    fn rate_solve_is_unsupported() {
        let result = solve(MortgageInput {
            amount: Some(100000.0),
            interest_rate: None,
            no_of_payments: Some(360.0),
            payment: Some(536.82),
        });

        assert_eq!(
            result,
            Err(SolveError::UnsupportedSolve {
                field: "Interest rate"
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Interest rate calculation is not defined."
        );
    }

    #[test]
    fn zero_rate_payment_is_not_a_number() {
        let solution = solve(MortgageInput {
            amount: Some(100000.0),
            interest_rate: Some(0.0),
            no_of_payments: Some(360.0),
            payment: None,
        })
        .unwrap();

        assert!(solution.value.is_nan());
    }

    #[test]
    fn payment_below_interest_gives_non_finite_term() {
        // 100 a month never covers 5% on 100k, so the log argument is negative.
        let solution = solve(MortgageInput {
            amount: Some(100000.0),
            interest_rate: Some(5.0),
            no_of_payments: None,
            payment: Some(100.0),
        })
        .unwrap();

        assert!(!solution.is_finite());
    }

    #[test]
    fn all_filled_and_all_blank_are_rejected() {
        let filled = MortgageInput {
            amount: Some(1.0),
            interest_rate: Some(1.0),
            no_of_payments: Some(1.0),
            payment: Some(1.0),
        };

        assert_eq!(solve(filled), Err(SolveError::AllFieldsFilled));
        assert_eq!(solve(MortgageInput::default()), Err(SolveError::AllFieldsEmpty));
    }

    #[test]
    fn from_texts_maps_fields_in_order() {
        let input = MortgageInput::from_texts(["100000", "5", "360", ""]).unwrap();

        assert_eq!(input.amount, Some(100000.0));
        assert_eq!(input.interest_rate, Some(5.0));
        assert_eq!(input.no_of_payments, Some(360.0));
        assert_eq!(input.payment, None);
    }
}
