//! Registration record - the data collected across the wizard steps

use serde::{Deserialize, Serialize};

/// Country recorded on every address; the wizard only onboards Indian sellers
pub const COUNTRY: &str = "INDIA";

/// Everything collected by the wizard.
///
/// Each section stays `None` until its step has been submitted successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    #[serde(default)]
    pub gst: Option<GstRecord>,

    #[serde(default)]
    pub pan: Option<PanRecord>,

    #[serde(default)]
    pub business: Option<BusinessProfile>,
}

impl RegistrationRecord {
    /// True once all three sections have been filled in
    pub fn is_complete(&self) -> bool {
        self.gst.is_some() && self.pan.is_some() && self.business.is_some()
    }
}

/// GST registration details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstRecord {
    /// GSTIN; empty when the business is not registered
    #[serde(default)]
    pub gst_number: String,

    pub is_registered: bool,
}

/// PAN details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanRecord {
    pub pan_number: String,

    #[serde(default = "default_true")]
    pub is_registered: bool,
}

fn default_true() -> bool {
    true
}

/// Primary product category of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clothing,
    Accessories,
    Footwear,
}

impl Category {
    /// Get all categories in menu order
    pub fn all() -> &'static [Category] {
        &[Category::Clothing, Category::Accessories, Category::Footwear]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothing => "clothing",
            Category::Accessories => "accessories",
            Category::Footwear => "footwear",
        }
    }

    /// Human-facing label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Accessories => "Accessories",
            Category::Footwear => "Footwear",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clothing" => Ok(Category::Clothing),
            "accessories" => Ok(Category::Accessories),
            "footwear" => Ok(Category::Footwear),
            _ => Err(format!(
                "Invalid category: {}. Use clothing, accessories, or footwear",
                s
            )),
        }
    }
}

/// Store profile collected on the last step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub store_name: String,
    pub category: Category,
    pub address: Address,
}

/// Postal address of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub pincode: String,
    pub address_line1: String,

    #[serde(default)]
    pub address_line2: String,

    pub city: String,
    pub state: String,

    #[serde(default = "default_country", deserialize_with = "fixed_country")]
    country: String,
}

fn default_country() -> String {
    COUNTRY.to_string()
}

/// Whatever a record file says, the country is pinned
fn fixed_country<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let _ = String::deserialize(deserializer)?;
    Ok(default_country())
}

impl Address {
    pub fn new(
        pincode: impl Into<String>,
        address_line1: impl Into<String>,
        address_line2: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            pincode: pincode.into(),
            address_line1: address_line1.into(),
            address_line2: address_line2.into(),
            city: city.into(),
            state: state.into(),
            country: default_country(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}
