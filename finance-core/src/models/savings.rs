use serde::{Deserialize, Serialize};

use super::CompoundField;

/// Savings calculator state.
///
/// Same shape as [`super::CompoundInterest`] and addressed with the same
/// field identifiers. No screen or solver uses it yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub present_value: f64,
    pub future_value: f64,
    pub interest_rate: f64,
    pub no_of_payments: f64,
    pub history: Vec<String>,
}

impl Savings {
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
