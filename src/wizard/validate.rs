//! Step validators
//!
//! Each validator is a pure function from the raw inputs of one step to the
//! validated section of the registration record. Callers own the record.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::catalog::RegionCatalog;
use crate::core::record::{Address, BusinessProfile, Category, GstRecord, PanRecord};
use crate::wizard::error::ValidationError;
use crate::wizard::normalize::{normalize_tax_id, normalize_tax_id_capped};
use crate::wizard::resolver::CitySelection;

/// GSTIN length
pub const GST_LEN: usize = 15;

/// PAN length; the input field accepts no more than this
pub const PAN_LEN: usize = 10;

static GST_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("GST charset pattern is valid"));

/// Five letters, four digits, one letter
static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN pattern is valid"));

/// Raw GST step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GstInput {
    pub gst_number: String,
    pub is_registered: bool,
}

impl Default for GstInput {
    fn default() -> Self {
        Self {
            gst_number: String::new(),
            is_registered: true,
        }
    }
}

impl GstInput {
    pub fn new(gst_number: &str, is_registered: bool) -> Self {
        let mut input = Self {
            gst_number: String::new(),
            is_registered,
        };
        input.set_number(gst_number);
        input
    }

    /// Apply an edit to the number field
    pub fn set_number(&mut self, raw: &str) {
        self.gst_number = normalize_tax_id(raw);
    }
}

/// Raw PAN step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanInput {
    pub pan_number: String,
    pub is_registered: bool,
}

impl Default for PanInput {
    fn default() -> Self {
        Self {
            pan_number: String::new(),
            is_registered: true,
        }
    }
}

impl PanInput {
    pub fn new(pan_number: &str) -> Self {
        let mut input = Self::default();
        input.set_number(pan_number);
        input
    }

    /// Apply an edit to the number field
    pub fn set_number(&mut self, raw: &str) {
        self.pan_number = normalize_tax_id_capped(raw, PAN_LEN);
    }
}

/// Raw business profile step input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessInput {
    pub store_name: String,
    pub category: String,
    pub pincode: String,
    pub address_line1: String,
    pub address_line2: String,
    pub location: CitySelection,
}

/// Validate the GST step.
///
/// An unregistered business skips the number entirely; whatever was typed is
/// dropped.
pub fn validate_gst(input: &GstInput) -> Result<GstRecord, ValidationError> {
    if !input.is_registered {
        return Ok(GstRecord {
            gst_number: String::new(),
            is_registered: false,
        });
    }

    let number = input.gst_number.trim();
    if number.is_empty() {
        return Err(ValidationError::MissingField { field: "GST number" });
    }

    let len = number.chars().count();
    if len != GST_LEN {
        return Err(ValidationError::InvalidLength {
            field: "GST number",
            expected: GST_LEN,
            actual: len,
        });
    }

    if !GST_CHARSET.is_match(number) {
        return Err(ValidationError::InvalidFormat {
            field: "GST number",
            hint: "A GSTIN has only uppercase letters and digits",
        });
    }

    Ok(GstRecord {
        gst_number: number.to_string(),
        is_registered: true,
    })
}

/// Validate the PAN step.
///
/// Unlike GST, the number is required whatever the registration flag says.
pub fn validate_pan(input: &PanInput) -> Result<PanRecord, ValidationError> {
    if !PAN_PATTERN.is_match(&input.pan_number) {
        return Err(ValidationError::InvalidFormat {
            field: "PAN number",
            hint: "A PAN is 5 letters, 4 digits, then 1 letter (e.g. ABCDE1234F)",
        });
    }

    Ok(PanRecord {
        pan_number: input.pan_number.clone(),
        is_registered: input.is_registered,
    })
}

/// Validate the business profile step against the region catalog
pub fn validate_business(
    input: &BusinessInput,
    catalog: &RegionCatalog,
) -> Result<BusinessProfile, ValidationError> {
    let store_name = required(&input.store_name, "Store name")?;

    let category_raw = required(&input.category, "Product category")?;
    let category = category_raw
        .parse::<Category>()
        .map_err(|_| ValidationError::InvalidCategory {
            value: category_raw.to_string(),
        })?;

    let pincode = required(&input.pincode, "Pincode")?;
    let line1 = required(&input.address_line1, "Address line 1")?;

    let state = required(input.location.state().unwrap_or_default(), "State")?;
    if !catalog.contains_state(state) {
        return Err(ValidationError::UnknownRegion {
            state: state.to_string(),
        });
    }

    let city = input.location.city().trim();
    let resolved = !city.is_empty()
        && (input.location.is_free_text() || catalog.has_city(state, city));
    if !resolved {
        return Err(ValidationError::UnresolvedCity {
            state: state.to_string(),
        });
    }

    Ok(BusinessProfile {
        store_name: store_name.to_string(),
        category,
        address: Address::new(pincode, line1, input.address_line2.trim(), city, state),
    })
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(trimmed)
    }
}
