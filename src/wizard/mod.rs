//! Registration wizard - step sequencing, validation and city resolution

pub mod error;
pub mod normalize;
pub mod resolver;
pub mod sequencer;
pub mod sink;
pub mod validate;

pub use error::{ResolverError, ValidationError, WizardError};
pub use normalize::normalize_tax_id;
pub use resolver::{CitySelection, OTHER_CITY};
pub use sequencer::{RegistrationWizard, Step, StepInput, STEP_COUNT};
pub use sink::{LogSink, MemorySink, SubmissionSink};
pub use validate::{
    validate_business, validate_gst, validate_pan, BusinessInput, GstInput, PanInput,
};
