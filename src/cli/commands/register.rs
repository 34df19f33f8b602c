//! `onboard register` command - run the registration wizard

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_field_error, render_record, resolve_format};
use crate::cli::prompt::{Navigation, StepPrompter};
use crate::cli::GlobalOpts;
use crate::core::catalog::RegionCatalog;
use crate::core::record::RegistrationRecord;
use crate::core::Config;
use crate::wizard::{
    BusinessInput, CitySelection, GstInput, LogSink, PanInput, RegistrationWizard, Step,
    StepInput, SubmissionSink, WizardError, OTHER_CITY,
};

#[derive(clap::Args, Debug, Default)]
pub struct RegisterArgs {
    /// Do not prompt; take every field from flags
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// GST number (15 characters)
    #[arg(long, conflicts_with = "unregistered")]
    pub gst: Option<String>,

    /// The business has no GST registration
    #[arg(long)]
    pub unregistered: bool,

    /// PAN number (e.g. ABCDE1234F)
    #[arg(long)]
    pub pan: Option<String>,

    /// Store name
    #[arg(long)]
    pub store_name: Option<String>,

    /// Primary product category (clothing, accessories, footwear)
    #[arg(long)]
    pub category: Option<String>,

    /// Postal code
    #[arg(long)]
    pub pincode: Option<String>,

    /// Address line 1
    #[arg(long)]
    pub line1: Option<String>,

    /// Address line 2
    #[arg(long)]
    pub line2: Option<String>,

    /// State
    #[arg(long)]
    pub state: Option<String>,

    /// City from the state's list
    #[arg(long, conflicts_with = "custom_city", requires = "state")]
    pub city: Option<String>,

    /// City not in the state's list
    #[arg(long, requires = "state")]
    pub custom_city: Option<String>,
}

pub fn run(args: RegisterArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = RegionCatalog::builtin().into_diagnostic()?;
    let mut wizard = RegistrationWizard::new(&catalog);

    if args.yes {
        run_scripted(&mut wizard, &args)?;
    } else {
        let default_state = args.state.clone().or_else(|| config.default_state.clone());
        let mut prompter = StepPrompter::new(default_state);
        seed_drafts(&mut prompter, &args, &catalog)?;
        run_interactive(&mut wizard, &mut prompter)?;
    }

    let record = finish(wizard, &mut LogSink)?;
    print_record(&record, global, &config)
}

/// Hand the completed record to the sink
pub fn finish(
    wizard: RegistrationWizard<'_>,
    sink: &mut dyn SubmissionSink,
) -> Result<RegistrationRecord> {
    let record = wizard
        .into_record()
        .ok_or_else(|| miette::miette!("Registration was not completed"))?;
    sink.accept(&record);
    Ok(record)
}

/// Drive every step from flags, failing on the first rejected step
pub fn run_scripted(wizard: &mut RegistrationWizard<'_>, args: &RegisterArgs) -> Result<()> {
    let gst = GstInput::new(args.gst.as_deref().unwrap_or_default(), !args.unregistered);
    wizard.submit(StepInput::Gst(gst))?;

    let pan = PanInput::new(args.pan.as_deref().unwrap_or_default());
    wizard.submit(StepInput::Pan(pan))?;

    let business = business_from_args(args, wizard.catalog())?;
    wizard.submit(StepInput::Business(business))?;
    Ok(())
}

fn run_interactive(wizard: &mut RegistrationWizard<'_>, prompter: &mut StepPrompter) -> Result<()> {
    while !wizard.is_complete() {
        let step = wizard.step();
        prompter.header(step);

        let Some(input) = prompter.prompt(step, wizard.catalog())? else {
            break;
        };

        if prompter.navigation(step)? == Navigation::Back {
            wizard.back()?;
            continue;
        }

        match wizard.submit(input) {
            Ok(Step::Complete) => {
                println!();
                println!("{} Registration complete!", style("✓").green());
            }
            Ok(_) => {}
            Err(WizardError::Invalid(e)) => {
                println!("{}", format_field_error(&e));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Pre-fill prompt drafts from any flags given alongside the interactive run
fn seed_drafts(
    prompter: &mut StepPrompter,
    args: &RegisterArgs,
    catalog: &RegionCatalog,
) -> Result<()> {
    if args.unregistered {
        prompter.gst.is_registered = false;
    }
    if let Some(ref gst) = args.gst {
        prompter.gst.set_number(gst);
    }
    if let Some(ref pan) = args.pan {
        prompter.pan.set_number(pan);
    }
    prompter.business = business_from_args(args, catalog)?;
    Ok(())
}

fn business_from_args(args: &RegisterArgs, catalog: &RegionCatalog) -> Result<BusinessInput> {
    let mut location = CitySelection::new();
    if let Some(ref state) = args.state {
        location.select_region(catalog, state);
        if let Some(ref custom) = args.custom_city {
            location.select_city(OTHER_CITY)?;
            location.set_free_text_city(custom)?;
        } else if let Some(ref city) = args.city {
            location.select_city(city)?;
        }
    }

    Ok(BusinessInput {
        store_name: args.store_name.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        pincode: args.pincode.clone().unwrap_or_default(),
        address_line1: args.line1.clone().unwrap_or_default(),
        address_line2: args.line2.clone().unwrap_or_default(),
        location,
    })
}

fn print_record(record: &RegistrationRecord, global: &GlobalOpts, config: &Config) -> Result<()> {
    let format = resolve_format(global.format, config);
    let rendered = render_record(record, format)?;
    if !global.quiet {
        eprintln!("{} Submitted registration", style("✓").green());
    }
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{MemorySink, ResolverError, ValidationError};

    fn full_args() -> RegisterArgs {
        RegisterArgs {
            yes: true,
            gst: Some("27aapfu0939f1zv".to_string()),
            pan: Some("ABCDE1234F".to_string()),
            store_name: Some("Silk Route".to_string()),
            category: Some("accessories".to_string()),
            pincode: Some("110001".to_string()),
            line1: Some("4 Janpath".to_string()),
            state: Some("Delhi".to_string()),
            city: Some("New Delhi".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_scripted_run_completes() {
        let catalog = RegionCatalog::builtin().unwrap();
        let mut wizard = RegistrationWizard::new(&catalog);
        run_scripted(&mut wizard, &full_args()).unwrap();

        let record = wizard.into_record().unwrap();
        assert_eq!(record.gst.unwrap().gst_number, "27AAPFU0939F1ZV");
        assert_eq!(record.business.unwrap().address.city, "New Delhi");
    }

    #[test]
    fn test_scripted_custom_city() {
        let catalog = RegionCatalog::builtin().unwrap();
        let mut wizard = RegistrationWizard::new(&catalog);
        let args = RegisterArgs {
            state: Some("Karnataka".to_string()),
            city: None,
            custom_city: Some("Hampi".to_string()),
            unregistered: true,
            gst: None,
            ..full_args()
        };
        run_scripted(&mut wizard, &args).unwrap();

        let record = wizard.into_record().unwrap();
        assert_eq!(record.gst.unwrap().gst_number, "");
        assert_eq!(record.business.unwrap().address.city, "Hampi");
    }

    #[test]
    fn test_scripted_stops_at_failing_step() {
        let catalog = RegionCatalog::builtin().unwrap();
        let mut wizard = RegistrationWizard::new(&catalog);
        let args = RegisterArgs {
            pan: None,
            ..full_args()
        };
        assert!(run_scripted(&mut wizard, &args).is_err());
        assert_eq!(wizard.step(), Step::Pan);
    }

    #[test]
    fn test_business_from_args_without_state() {
        let catalog = RegionCatalog::builtin().unwrap();
        let args = RegisterArgs {
            state: None,
            ..full_args()
        };
        let input = business_from_args(&args, &catalog).unwrap();
        assert_eq!(input.location.state(), None);
        assert_eq!(
            crate::wizard::validate_business(&input, &catalog),
            Err(ValidationError::MissingField { field: "State" })
        );
    }

    #[test]
    fn test_finish_hands_record_to_sink() {
        let catalog = RegionCatalog::builtin().unwrap();
        let mut wizard = RegistrationWizard::new(&catalog);
        run_scripted(&mut wizard, &full_args()).unwrap();

        let mut sink = MemorySink::default();
        let record = finish(wizard, &mut sink).unwrap();
        assert_eq!(sink.records, vec![record]);
        assert_eq!(
            sink.records[0].business.as_ref().unwrap().store_name,
            "Silk Route"
        );
    }

    #[test]
    fn test_finish_incomplete_skips_sink() {
        let catalog = RegionCatalog::builtin().unwrap();
        let wizard = RegistrationWizard::new(&catalog);

        let mut sink = MemorySink::default();
        assert!(finish(wizard, &mut sink).is_err());
        assert!(sink.records.is_empty());
    }

    #[test]
    fn test_business_from_args_city_outside_state() {
        let catalog = RegionCatalog::builtin().unwrap();
        let args = RegisterArgs {
            state: Some("Karnataka".to_string()),
            city: Some("Shahdara".to_string()),
            ..full_args()
        };
        let err = business_from_args(&args, &catalog).unwrap_err();
        let resolver = err.downcast_ref::<ResolverError>().unwrap();
        assert!(matches!(resolver, ResolverError::UnknownCity { .. }));
    }
}
