use std::fmt;

use finance_core::models::InputField;
use finance_core::{SaveError, Solution, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn title(self) -> &'static str {
        match self {
            MessageType::Info => "Alert",
            MessageType::Success => "Success Alert",
            MessageType::Warning => "Warning Alert",
            MessageType::Error => "Error Alert",
        }
    }
}

/// A message shown to the user after an action on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: MessageType,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(
        kind: MessageType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            message: message.into(),
        }
    }

    /// Reports the value written into the solved field.
    pub fn solved<F: InputField>(solution: &Solution<F>) -> Self {
        Self::new(
            MessageType::Info,
            format!(
                "{} is {}",
                solution.field.label(),
                solution.display_value()
            ),
        )
    }

    pub fn saved() -> Self {
        Self::new(MessageType::Success, "Successfully Saved.")
    }
}

impl From<&SolveError> for Alert {
    fn from(error: &SolveError) -> Self {
        let kind = match error {
            SolveError::InvalidNumber { .. } => MessageType::Error,
            _ => MessageType::Warning,
        };
        Self::new(kind, error.to_string())
    }
}

impl From<&SaveError> for Alert {
    fn from(error: &SaveError) -> Self {
        let kind = match error {
            SaveError::OneOrMoreFieldsEmpty => MessageType::Warning,
            SaveError::CalculateFirst => MessageType::Error,
        };
        Self::new(kind, error.to_string())
    }
}

impl fmt::Display for Alert {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use finance_core::CompoundField;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn solved_alert_names_the_field() {
        let solution = Solution {
            field: CompoundField::FutureValue,
            value: 1647.009_497,
        };

        let alert = Alert::solved(&solution);

        assert_eq!(alert.kind, MessageType::Info);
        assert_eq!(alert.title, "Alert");
        assert_eq!(alert.message, "Future Value is 1647.01");
    }

    #[test]
    fn non_finite_solution_is_shown_as_is() {
        let solution = Solution {
            field: CompoundField::PresentValue,
            value: f64::INFINITY,
        };

        assert_eq!(Alert::solved(&solution).message, "Present Value is inf");
    }

    #[test]
    fn field_count_errors_are_warnings() {
        let empty = Alert::from(&SolveError::AllFieldsEmpty);
        let filled = Alert::from(&SolveError::AllFieldsFilled);

        assert_eq!(empty.title, "Warning Alert");
        assert_eq!(empty.message, "Please enter value(s) to calculate");
        assert_eq!(filled.title, "Warning Alert");
        assert_eq!(filled.message, "Need one empty field.");
    }

    #[test]
    fn unsupported_rate_solve_message() {
        let alert = Alert::from(&SolveError::UnsupportedSolve {
            field: "Interest rate",
        });

        assert_eq!(alert.message, "Interest rate calculation is not defined.");
    }

    #[test]
    fn save_errors_map_to_distinct_titles() {
        let empty = Alert::from(&SaveError::OneOrMoreFieldsEmpty);
        let uncalculated = Alert::from(&SaveError::CalculateFirst);

        assert_eq!(empty.to_string(), "Warning Alert: One or More Input are Empty");
        assert_eq!(
            uncalculated.to_string(),
            "Error Alert: Please do calculate. Save Unsuccessful"
        );
    }

    #[test]
    fn saved_alert() {
        assert_eq!(Alert::saved().to_string(), "Success Alert: Successfully Saved.");
    }
}
