pub mod calculations;
pub mod history;
pub mod keypad;
pub mod models;
pub mod store;

pub use calculations::{Solution, SolveError};
pub use history::SaveError;
pub use keypad::{Key, KeypadState, Transition};
pub use models::*;
pub use store::{KeyValueStore, StoreConfig, StoreError, StoreRegistry};
