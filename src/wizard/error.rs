//! Wizard errors with field-level diagnostics

use miette::Diagnostic;
use thiserror::Error;

use crate::wizard::sequencer::Step;

/// Why a step's input was rejected.
///
/// Every variant is recoverable: it blocks the forward transition and the
/// user corrects the named field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("{field} is required")]
    #[diagnostic(code(onboard::validation::missing_field))]
    MissingField { field: &'static str },

    #[error("{field} must be {expected} characters long (got {actual})")]
    #[diagnostic(code(onboard::validation::invalid_length))]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Please enter a valid {field}")]
    #[diagnostic(code(onboard::validation::invalid_format), help("{hint}"))]
    InvalidFormat {
        field: &'static str,
        hint: &'static str,
    },

    #[error("Invalid product category: {value}")]
    #[diagnostic(
        code(onboard::validation::invalid_category),
        help("Choose one of: clothing, accessories, footwear")
    )]
    InvalidCategory { value: String },

    #[error("Unknown state: {state}")]
    #[diagnostic(
        code(onboard::validation::unknown_region),
        help("Run `onboard regions` to see the supported states")
    )]
    UnknownRegion { state: String },

    #[error("City is not resolved for {state}")]
    #[diagnostic(
        code(onboard::validation::unresolved_city),
        help("Pick a city from the list, or choose \"Other City\" and type its name")
    )]
    UnresolvedCity { state: String },
}

impl ValidationError {
    /// Name of the offending field, for inline display next to the prompt
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::InvalidFormat { field, .. } => *field,
            ValidationError::InvalidCategory { .. } => "Category",
            ValidationError::UnknownRegion { .. } => "State",
            ValidationError::UnresolvedCity { .. } => "City",
        }
    }
}

/// Errors from the step sequencer
#[derive(Debug, Error, Diagnostic)]
pub enum WizardError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Input belongs to the {actual} step, but the wizard is on the {expected} step")]
    #[diagnostic(code(onboard::wizard::wrong_step))]
    WrongStep { expected: Step, actual: Step },

    #[error("Registration is already complete")]
    #[diagnostic(code(onboard::wizard::complete))]
    AlreadyComplete,

    #[error("There is no step before {current}")]
    #[diagnostic(code(onboard::wizard::no_previous_step))]
    NoPreviousStep { current: Step },
}

/// Errors from the city resolver
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolverError {
    #[error("City can only be typed after choosing \"Other City\"")]
    #[diagnostic(code(onboard::resolver::not_free_text))]
    NotFreeText,

    #[error("Select a state before choosing a city")]
    #[diagnostic(code(onboard::resolver::no_region))]
    NoRegion,

    #[error("{city} is not a listed city in {state}")]
    #[diagnostic(
        code(onboard::resolver::unknown_city),
        help("Pick a city from the list, or choose \"Other City\" and type its name")
    )]
    UnknownCity { state: String, city: String },
}
