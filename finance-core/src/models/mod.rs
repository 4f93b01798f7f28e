mod compound_interest;
mod fields;
mod mortgage;
mod savings;

pub use compound_interest::CompoundInterest;
pub use fields::{CompoundField, InputField, MortgageField};
pub use mortgage::Mortgage;
pub use savings::Savings;
