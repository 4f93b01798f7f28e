pub mod app;
pub mod config;
pub mod logging;
pub mod screens;
pub mod session;
pub mod utils;

pub use screens::{Alert, CompoundInterestScreen, MessageType, MortgageScreen};
pub use session::{Command, CommandError, Response, Session, Tab};
