//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Two data fields share the same `name`.
    #[from(ignore)]
    #[display("Duplicate field name: '{_0}'")]
    DuplicateFieldName(String),

    /// A field name is not a safe identifier.
    #[from(ignore)]
    #[display("Invalid field name: '{_0}' is not a valid identifier")]
    InvalidFieldName(String),

    /// The variant tag is not present in the registry.
    #[from(ignore)]
    #[display("Unknown variant: '{_0}'")]
    UnknownVariant(String),

    /// A row group holds more fields than the 12 column grid can fit.
    #[from(ignore)]
    #[display("Row group of {_0} fields exceeds the 12 column grid")]
    GroupTooWide(usize),

    /// Two steps of a multi-step form share the same id.
    #[from(ignore)]
    #[display("Duplicate step id: '{_0}'")]
    DuplicateStepId(String),

    /// A conditional step depends on a field that does not exist in an earlier step.
    #[from(ignore)]
    #[display("Step '{step}' depends on '{depends_on}', which is not a field of an earlier step")]
    InvalidConditionalReference {
        /// Id of the conditional step.
        step: String,
        /// The referenced field name.
        depends_on: String,
    },

    /// A step condition is empty or its delimiters do not balance.
    #[from(ignore)]
    #[display("Invalid condition on step '{step}': {reason}")]
    InvalidCondition {
        /// Id of the conditional step.
        step: String,
        /// What is wrong with the expression.
        reason: String,
    },

    /// A multi-step form was given no steps.
    #[from(ignore)]
    #[display("A multi-step form needs at least one step")]
    NoSteps,

    /// The formatter rejected the assembled source. Indicates an assembler bug.
    #[from(ignore)]
    #[display("Formatter Failure: {_0}")]
    FormatterFailure(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String defaults to General, never to one of the typed variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_typed_variant_display() {
        let err = AppError::UnknownVariant("Foo".into());
        assert_eq!(format!("{}", err), "Unknown variant: 'Foo'");

        let err = AppError::InvalidConditionalReference {
            step: "details".into(),
            depends_on: "newsletter".into(),
        };
        assert_eq!(
            err.to_string(),
            "Step 'details' depends on 'newsletter', which is not a field of an earlier step"
        );

        assert_eq!(
            AppError::NoSteps.to_string(),
            "A multi-step form needs at least one step"
        );
    }
}
