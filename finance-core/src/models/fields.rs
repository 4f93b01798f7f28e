//! Identifiers for the four numeric inputs of each calculator screen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric input on one of the calculator screens.
///
/// Every calculator has exactly four fields. [`InputField::ALL`] lists them
/// in the order the solver checks for a blank one.
pub trait InputField: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const ALL: [Self; 4];

    /// Key under which the raw field text is persisted.
    fn storage_key(self) -> &'static str;

    /// Human readable label.
    fn label(self) -> &'static str;

    /// Short lowercase name accepted by the terminal front end.
    fn command_name(self) -> &'static str;

    fn from_command_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.command_name() == name)
    }

    /// Position of the field within [`InputField::ALL`].
    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundField {
    PresentValue,
    FutureValue,
    InterestRate,
    NoOfPayments,
}

impl InputField for CompoundField {
    const ALL: [Self; 4] = [
        Self::PresentValue,
        Self::FutureValue,
        Self::InterestRate,
        Self::NoOfPayments,
    ];

    fn storage_key(self) -> &'static str {
        match self {
            Self::PresentValue => "compound_present",
            Self::FutureValue => "compound_future",
            Self::InterestRate => "compound_interest",
            Self::NoOfPayments => "compound_noOfPayment",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::PresentValue => "Present Value",
            Self::FutureValue => "Future Value",
            Self::InterestRate => "Interest Rate",
            Self::NoOfPayments => "No. of Payments",
        }
    }

    fn command_name(self) -> &'static str {
        match self {
            Self::PresentValue => "present",
            Self::FutureValue => "future",
            Self::InterestRate => "rate",
            Self::NoOfPayments => "payments",
        }
    }
}

impl fmt::Display for CompoundField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MortgageField {
    Amount,
    InterestRate,
    NoOfPayments,
    Payment,
}

impl InputField for MortgageField {
    const ALL: [Self; 4] = [
        Self::Amount,
        Self::InterestRate,
        Self::NoOfPayments,
        Self::Payment,
    ];

    fn storage_key(self) -> &'static str {
        match self {
            Self::Amount => "mortgage_amount",
            Self::InterestRate => "mortgage_interest_rate",
            Self::NoOfPayments => "mortgage_noOfPayments",
            Self::Payment => "mortgage_payment",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Amount => "Mortgage Amount",
            Self::InterestRate => "Interest Rate",
            Self::NoOfPayments => "No. of Payments",
            Self::Payment => "Payment",
        }
    }

    fn command_name(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::InterestRate => "rate",
            Self::NoOfPayments => "payments",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for MortgageField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn compound_storage_keys_match_persisted_layout() {
        let keys: Vec<_> = CompoundField::ALL.iter().map(|f| f.storage_key()).collect();

        assert_eq!(
            keys,
            vec![
                "compound_present",
                "compound_future",
                "compound_interest",
                "compound_noOfPayment"
            ]
        );
    }

    #[test]
    fn mortgage_storage_keys_match_persisted_layout() {
        let keys: Vec<_> = MortgageField::ALL.iter().map(|f| f.storage_key()).collect();

        assert_eq!(
            keys,
            vec![
                "mortgage_amount",
                "mortgage_interest_rate",
                "mortgage_noOfPayments",
                "mortgage_payment"
            ]
        );
    }

    #[test]
    fn from_command_name_is_case_insensitive() {
        assert_eq!(
            CompoundField::from_command_name("Rate"),
            Some(CompoundField::InterestRate)
        );
        assert_eq!(
            MortgageField::from_command_name(" payment "),
            Some(MortgageField::Payment)
        );
        assert_eq!(MortgageField::from_command_name("present"), None);
    }

    #[test]
    fn index_follows_declaration_order() {
        assert_eq!(CompoundField::PresentValue.index(), 0);
        assert_eq!(CompoundField::NoOfPayments.index(), 3);
        assert_eq!(MortgageField::Payment.index(), 3);
    }
}
