mod alert;
mod compound_interest;
mod form;
mod mortgage;

pub use alert::{Alert, MessageType};
pub use compound_interest::CompoundInterestScreen;
pub use form::{Form, SaveOutcome, ScreenError};
pub use mortgage::MortgageScreen;
