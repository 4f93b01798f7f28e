use serde::{Deserialize, Serialize};

use super::CompoundField;

/// Last known state of the compound interest screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterest {
    pub present_value: f64,
    pub future_value: f64,
    /// Nominal annual rate, in percent.
    pub interest_rate: f64,
    /// Term in years; compounding is monthly.
    pub no_of_payments: f64,

    /// Saved summaries, oldest first.
    pub history: Vec<String>,
}

impl CompoundInterest {
    pub fn get(
        &self,
        field: CompoundField,
    ) -> f64 {
        match field {
            CompoundField::PresentValue => self.present_value,
            CompoundField::FutureValue => self.future_value,
            CompoundField::InterestRate => self.interest_rate,
            CompoundField::NoOfPayments => self.no_of_payments,
        }
    }

    pub fn set(
        &mut self,
        field: CompoundField,
        value: f64,
    ) {
        match field {
            CompoundField::PresentValue => self.present_value = value,
            CompoundField::FutureValue => self.future_value = value,
            CompoundField::InterestRate => self.interest_rate = value,
            CompoundField::NoOfPayments => self.no_of_payments = value,
        }
    }
}
