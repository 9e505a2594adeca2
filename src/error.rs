use thiserror::Error;

use crate::constants::{EXIT_INVALID_ARGS, EXIT_INVALID_VALUE, EXIT_PARSE_FAILED};

/// Input errors. All are detected before any computation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightCalcError {
    #[error("expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("invalid {name}: '{token}' is not a number")]
    Parse { name: &'static str, token: String },

    #[error("{name} {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl FlightCalcError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlightCalcError::ArgumentCount { .. } => EXIT_INVALID_ARGS,
            FlightCalcError::Parse { .. } => EXIT_PARSE_FAILED,
            FlightCalcError::InvalidValue { .. } => EXIT_INVALID_VALUE,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FlightCalcError::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightCalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let count = FlightCalcError::ArgumentCount { expected: 4, found: 2 };
        let parse = FlightCalcError::Parse { name: "track", token: "abc".to_string() };
        let value = FlightCalcError::invalid("wind speed", "cannot be negative");

        assert_eq!(count.exit_code(), 1);
        assert_eq!(parse.exit_code(), 2);
        assert_eq!(value.exit_code(), 3);
    }

    #[test]
    fn test_messages() {
        let parse = FlightCalcError::Parse { name: "track", token: "abc".to_string() };
        assert_eq!(parse.to_string(), "invalid track: 'abc' is not a number");

        let value = FlightCalcError::invalid("wind speed", "cannot be negative");
        assert_eq!(value.to_string(), "wind speed cannot be negative");
    }
}
