use serde::{Deserialize, Serialize};

use super::MortgageField;

/// Last known state of the mortgage screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mortgage {
    pub amount: f64,
    /// Nominal annual rate, in percent.
    pub interest_rate: f64,
    /// Total number of monthly payments.
    pub no_of_payments: f64,
    /// Monthly payment.
    pub payment: f64,

    /// Saved summaries, oldest first.
    pub history: Vec<String>,
}

impl Mortgage {
    pub fn get(
        &self,
        field: MortgageField,
    ) -> f64 {
        match field {
            MortgageField::Amount => self.amount,
            MortgageField::InterestRate => self.interest_rate,
            MortgageField::NoOfPayments => self.no_of_payments,
            MortgageField::Payment => self.payment,
        }
    }

    pub fn set(
        &mut self,
        field: MortgageField,
        value: f64,
    ) {
        match field {
            MortgageField::Amount => self.amount = value,
            MortgageField::InterestRate => self.interest_rate = value,
            MortgageField::NoOfPayments => self.no_of_payments = value,
            MortgageField::Payment => self.payment = value,
        }
    }
}
