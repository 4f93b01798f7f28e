//! Closed-form solvers for the calculator screens.
//!
//! Each solver takes four optional inputs, finds the single blank one and
//! evaluates the matching formula for it.

pub mod common;
pub mod compound;
pub mod mortgage;
pub mod solve;

pub use compound::{CompoundInterestInput, CompoundInterestSolver};
pub use mortgage::{MortgageInput, MortgageSolver};
pub use solve::{Solution, SolveError, parse_field, select_unknown};
