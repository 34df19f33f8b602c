//! Step sequencer - the wizard's state machine
//!
//! Owns the active step and the registration record. A step's validator must
//! succeed before the wizard moves forward; going back never discards data.

use crate::core::catalog::RegionCatalog;
use crate::core::record::RegistrationRecord;
use crate::wizard::error::WizardError;
use crate::wizard::validate::{
    validate_business, validate_gst, validate_pan, BusinessInput, GstInput, PanInput,
};

/// Number of input steps before completion
pub const STEP_COUNT: usize = 3;

/// Wizard steps in the order they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Gst,
    Pan,
    Business,
    Complete,
}

impl Step {
    /// 1-based position, for "Step 2 of 3" style progress
    pub fn number(&self) -> usize {
        match self {
            Step::Gst => 1,
            Step::Pan => 2,
            Step::Business => 3,
            Step::Complete => STEP_COUNT + 1,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Gst => "GST registration",
            Step::Pan => "PAN details",
            Step::Business => "Tell us about your business",
            Step::Complete => "Done",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Gst => Some(Step::Pan),
            Step::Pan => Some(Step::Business),
            Step::Business => Some(Step::Complete),
            Step::Complete => None,
        }
    }

    /// Step reached by "Back"; the first step and the terminal state have none
    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Gst => None,
            Step::Pan => Some(Step::Gst),
            Step::Business => Some(Step::Pan),
            Step::Complete => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Gst => write!(f, "gst"),
            Step::Pan => write!(f, "pan"),
            Step::Business => write!(f, "business"),
            Step::Complete => write!(f, "complete"),
        }
    }
}

/// Input submitted for one step
#[derive(Debug, Clone)]
pub enum StepInput {
    Gst(GstInput),
    Pan(PanInput),
    Business(BusinessInput),
}

impl StepInput {
    /// The step this input belongs to
    pub fn step(&self) -> Step {
        match self {
            StepInput::Gst(_) => Step::Gst,
            StepInput::Pan(_) => Step::Pan,
            StepInput::Business(_) => Step::Business,
        }
    }
}

/// Registration wizard controller
#[derive(Debug)]
pub struct RegistrationWizard<'c> {
    catalog: &'c RegionCatalog,
    step: Step,
    record: RegistrationRecord,
}

impl<'c> RegistrationWizard<'c> {
    /// Start a new session on the first step with an empty record
    pub fn new(catalog: &'c RegionCatalog) -> Self {
        Self {
            catalog,
            step: Step::Gst,
            record: RegistrationRecord::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    pub fn catalog(&self) -> &'c RegionCatalog {
        self.catalog
    }

    pub fn is_complete(&self) -> bool {
        self.step == Step::Complete
    }

    /// Validate the input for the active step, merge it, and advance.
    ///
    /// On a validation failure the wizard stays on the same step and the
    /// record is untouched.
    pub fn submit(&mut self, input: StepInput) -> Result<Step, WizardError> {
        if self.step == Step::Complete {
            return Err(WizardError::AlreadyComplete);
        }
        if input.step() != self.step {
            return Err(WizardError::WrongStep {
                expected: self.step,
                actual: input.step(),
            });
        }

        let result = match input {
            StepInput::Gst(gst) => validate_gst(&gst).map(|r| self.record.gst = Some(r)),
            StepInput::Pan(pan) => validate_pan(&pan).map(|r| self.record.pan = Some(r)),
            StepInput::Business(business) => validate_business(&business, self.catalog)
                .map(|r| self.record.business = Some(r)),
        };

        if let Err(e) = result {
            tracing::debug!(step = %self.step, field = e.field(), error = %e, "step rejected");
            return Err(e.into());
        }

        let from = self.step;
        self.step = from.next().unwrap_or(Step::Complete);
        tracing::debug!(%from, to = %self.step, "step completed");
        Ok(self.step)
    }

    /// Move to the previous step, keeping everything entered so far
    pub fn back(&mut self) -> Result<Step, WizardError> {
        if self.step == Step::Complete {
            return Err(WizardError::AlreadyComplete);
        }
        let previous = self
            .step
            .previous()
            .ok_or(WizardError::NoPreviousStep { current: self.step })?;
        tracing::debug!(from = %self.step, to = %previous, "step back");
        self.step = previous;
        Ok(previous)
    }

    /// The finished record; `None` until the last step has succeeded
    pub fn into_record(self) -> Option<RegistrationRecord> {
        if self.is_complete() {
            Some(self.record)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::error::ValidationError;
    use crate::wizard::resolver::CitySelection;

    fn catalog() -> RegionCatalog {
        RegionCatalog::builtin().unwrap()
    }

    fn business(catalog: &RegionCatalog) -> BusinessInput {
        let mut location = CitySelection::new();
        location.select_region(catalog, "Maharashtra");
        location.select_city("Pune").unwrap();
        BusinessInput {
            store_name: "Kurta Corner".to_string(),
            category: "clothing".to_string(),
            pincode: "411001".to_string(),
            address_line1: "5 FC Road".to_string(),
            address_line2: String::new(),
            location,
        }
    }

    #[test]
    fn test_step_order() {
        assert_eq!(Step::Gst.next(), Some(Step::Pan));
        assert_eq!(Step::Pan.next(), Some(Step::Business));
        assert_eq!(Step::Business.next(), Some(Step::Complete));
        assert_eq!(Step::Complete.next(), None);
        assert_eq!(Step::Gst.previous(), None);
        assert_eq!(Step::Business.previous(), Some(Step::Pan));
    }

    #[test]
    fn test_starts_on_gst_with_empty_record() {
        let catalog = catalog();
        let wizard = RegistrationWizard::new(&catalog);
        assert_eq!(wizard.step(), Step::Gst);
        assert_eq!(wizard.record(), &RegistrationRecord::default());
    }

    #[test]
    fn test_unregistered_gst_advances_with_empty_number() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);

        let step = wizard
            .submit(StepInput::Gst(GstInput::new("", false)))
            .unwrap();
        assert_eq!(step, Step::Pan);

        let gst = wizard.record().gst.as_ref().unwrap();
        assert_eq!(gst.gst_number, "");
        assert!(!gst.is_registered);
    }

    #[test]
    fn test_back_keeps_data() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        wizard
            .submit(StepInput::Gst(GstInput::new("", false)))
            .unwrap();

        assert_eq!(wizard.back().unwrap(), Step::Gst);
        assert_eq!(wizard.step(), Step::Gst);
        assert!(wizard.record().gst.is_some());
    }

    #[test]
    fn test_back_on_first_step() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        assert!(matches!(
            wizard.back(),
            Err(WizardError::NoPreviousStep { current: Step::Gst })
        ));
        assert_eq!(wizard.step(), Step::Gst);
    }

    #[test]
    fn test_rejected_step_stays_put() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        wizard
            .submit(StepInput::Gst(GstInput::new("", false)))
            .unwrap();

        let err = wizard
            .submit(StepInput::Pan(PanInput::new("ABCD12345F")))
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::Invalid(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(wizard.step(), Step::Pan);
        assert!(wizard.record().pan.is_none());
    }

    #[test]
    fn test_wrong_step_input() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        let err = wizard
            .submit(StepInput::Pan(PanInput::new("ABCDE1234F")))
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::WrongStep {
                expected: Step::Gst,
                actual: Step::Pan
            }
        ));
    }

    #[test]
    fn test_resubmit_after_back_overwrites_section() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        wizard
            .submit(StepInput::Gst(GstInput::new("", false)))
            .unwrap();
        wizard.back().unwrap();
        wizard
            .submit(StepInput::Gst(GstInput::new("27AAPFU0939F1ZV", true)))
            .unwrap();
        assert_eq!(
            wizard.record().gst.as_ref().unwrap().gst_number,
            "27AAPFU0939F1ZV"
        );
    }

    #[test]
    fn test_full_run_completes() {
        let catalog = catalog();
        let mut wizard = RegistrationWizard::new(&catalog);
        wizard
            .submit(StepInput::Gst(GstInput::new("27AAPFU0939F1ZV", true)))
            .unwrap();
        wizard
            .submit(StepInput::Pan(PanInput::new("abcde1234f")))
            .unwrap();
        let step = wizard
            .submit(StepInput::Business(business(&catalog)))
            .unwrap();
        assert_eq!(step, Step::Complete);
        assert!(wizard.is_complete());

        assert!(matches!(wizard.back(), Err(WizardError::AlreadyComplete)));
        assert!(matches!(
            wizard.submit(StepInput::Gst(GstInput::default())),
            Err(WizardError::AlreadyComplete)
        ));

        let record = wizard.into_record().unwrap();
        assert!(record.is_complete());
        assert_eq!(record.pan.unwrap().pan_number, "ABCDE1234F");
        assert_eq!(record.business.unwrap().address.city, "Pune");
    }

    #[test]
    fn test_into_record_before_completion() {
        let catalog = catalog();
        let wizard = RegistrationWizard::new(&catalog);
        assert!(wizard.into_record().is_none());
    }
}
