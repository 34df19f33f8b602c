//! `onboard check` command - validate a saved registration record

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::helpers::format_field_error;
use crate::cli::GlobalOpts;
use crate::core::catalog::RegionCatalog;
use crate::core::record::{Category, COUNTRY};
use crate::wizard::{
    validate_business, validate_gst, validate_pan, BusinessInput, CitySelection, GstInput,
    PanInput, ResolverError, ValidationError, OTHER_CITY,
};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Record file (.yaml, .yml or .json)
    pub file: PathBuf,
}

/// Record as found on disk, before any validation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub gst: Option<RawGst>,
    pub pan: Option<RawPan>,
    pub business: Option<RawBusiness>,
}

#[derive(Debug, Deserialize)]
pub struct RawGst {
    #[serde(default)]
    pub gst_number: String,
    #[serde(default = "default_true")]
    pub is_registered: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawPan {
    #[serde(default)]
    pub pan_number: String,
    #[serde(default = "default_true")]
    pub is_registered: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawBusiness {
    pub store_name: String,
    pub category: String,
    pub address: RawAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub pincode: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub country: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A problem found in one section of the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub section: &'static str,
    pub error: ValidationError,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = RegionCatalog::builtin().into_diagnostic()?;
    let raw = read_record(&args.file)?;
    let problems = check_record(&raw, &catalog);
    let name = args.file.display();

    if problems.is_empty() {
        if !global.quiet {
            println!("{} {} is a valid registration", style("✓").green(), name);
        }
        return Ok(());
    }

    for problem in &problems {
        println!("[{}] {}", problem.section, format_field_error(&problem.error));
    }
    Err(miette::miette!(
        "{} problem{} found in {}",
        problems.len(),
        if problems.len() == 1 { "" } else { "s" },
        name
    ))
}

/// Parse a record file; `.json` is read as JSON, anything else as YAML
pub fn read_record(path: &Path) -> Result<RawRecord> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&contents).into_diagnostic()
    } else {
        serde_yml::from_str(&contents).into_diagnostic()
    }
}

/// Run every step validator over a stored record, collecting all failures.
///
/// Stored values are checked as-is, without keystroke normalization. A city
/// missing from the state's list counts as a typed-in city. On top of the
/// step validators, a file must hold exactly what the wizard would have
/// written: no GST number without registration, a lowercase category and
/// the fixed country.
pub fn check_record(raw: &RawRecord, catalog: &RegionCatalog) -> Vec<Problem> {
    let mut problems = Vec::new();

    match &raw.gst {
        Some(gst) => {
            let input = GstInput {
                gst_number: gst.gst_number.clone(),
                is_registered: gst.is_registered,
            };
            if let Err(error) = validate_gst(&input) {
                problems.push(Problem { section: "gst", error });
            }
            if !gst.is_registered && !gst.gst_number.is_empty() {
                problems.push(Problem {
                    section: "gst",
                    error: ValidationError::InvalidFormat {
                        field: "GST number",
                        hint: "An unregistered business has no GST number",
                    },
                });
            }
        }
        None => problems.push(missing_section("gst", "GST details")),
    }

    match &raw.pan {
        Some(pan) => {
            let input = PanInput {
                pan_number: pan.pan_number.clone(),
                is_registered: pan.is_registered,
            };
            if let Err(error) = validate_pan(&input) {
                problems.push(Problem { section: "pan", error });
            }
        }
        None => problems.push(missing_section("pan", "PAN details")),
    }

    match &raw.business {
        Some(business) => {
            let state = business.address.state.trim();
            let result = business_input(business, catalog)
                .map_err(|_| ValidationError::UnresolvedCity {
                    state: state.to_string(),
                })
                .and_then(|input| validate_business(&input, catalog));
            if let Err(error) = result {
                problems.push(Problem {
                    section: "business",
                    error,
                });
            }
            problems.extend(stored_business_problems(business).into_iter().map(|error| {
                Problem {
                    section: "business",
                    error,
                }
            }));
        }
        None => problems.push(missing_section("business", "Business profile")),
    }

    problems
}

fn missing_section(section: &'static str, field: &'static str) -> Problem {
    Problem {
        section,
        error: ValidationError::MissingField { field },
    }
}

/// Rules that only apply to stored files; the wizard cannot produce these
fn stored_business_problems(raw: &RawBusiness) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    let category = raw.category.as_str();
    if let Ok(parsed) = category.parse::<Category>() {
        if parsed.as_str() != category {
            problems.push(ValidationError::InvalidCategory {
                value: category.to_string(),
            });
        }
    }

    if let Some(ref country) = raw.address.country {
        if country != COUNTRY {
            problems.push(ValidationError::InvalidFormat {
                field: "Country",
                hint: "Only INDIA is supported",
            });
        }
    }

    problems
}

fn business_input(
    raw: &RawBusiness,
    catalog: &RegionCatalog,
) -> Result<BusinessInput, ResolverError> {
    let addr = &raw.address;
    let mut location = CitySelection::new();
    if !addr.state.trim().is_empty() {
        location.select_region(catalog, addr.state.trim());
        if catalog.has_city(addr.state.trim(), &addr.city) {
            location.select_city(&addr.city)?;
        } else {
            location.select_city(OTHER_CITY)?;
            location.set_free_text_city(&addr.city)?;
        }
    }

    Ok(BusinessInput {
        store_name: raw.store_name.clone(),
        category: raw.category.clone(),
        pincode: addr.pincode.clone(),
        address_line1: addr.address_line1.clone(),
        address_line2: addr.address_line2.clone(),
        location,
    })
}
