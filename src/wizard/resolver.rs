//! Dependent state/city selection for the address step

use crate::core::catalog::RegionCatalog;
use crate::wizard::error::ResolverError;

/// Menu value that switches the city field to free text
pub const OTHER_CITY: &str = "other";

/// Current state and city choice.
///
/// The city is always empty, one of the selected state's cities, or text
/// typed after choosing [`OTHER_CITY`]. It never survives a state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySelection {
    state: Option<String>,
    cities: Vec<String>,
    city: String,
    free_text: bool,
}

impl CitySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a state, refreshing the city list and clearing the city
    pub fn select_region(&mut self, catalog: &RegionCatalog, state: &str) {
        self.cities = catalog.cities(state).to_vec();
        if self.cities.is_empty() {
            tracing::debug!(state, "state has no catalog cities");
        }
        self.state = Some(state.to_string());
        self.city.clear();
        self.free_text = false;
    }

    /// Choose a city from the menu, or [`OTHER_CITY`] to type one.
    ///
    /// Only the selected state's cities are accepted; a rejected value leaves
    /// the selection unchanged.
    pub fn select_city(&mut self, value: &str) -> Result<(), ResolverError> {
        let Some(state) = self.state.as_deref() else {
            return Err(ResolverError::NoRegion);
        };
        if value == OTHER_CITY {
            self.free_text = true;
            self.city.clear();
        } else if self.cities.iter().any(|c| c == value) {
            self.free_text = false;
            self.city = value.to_string();
        } else {
            return Err(ResolverError::UnknownCity {
                state: state.to_string(),
                city: value.to_string(),
            });
        }
        Ok(())
    }

    /// Set the typed city name; only allowed in free-text mode
    pub fn set_free_text_city(&mut self, text: &str) -> Result<(), ResolverError> {
        if !self.free_text {
            return Err(ResolverError::NotFreeText);
        }
        self.city = text.to_string();
        Ok(())
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn is_free_text(&self) -> bool {
        self.free_text
    }

    /// Menu entries: the state's cities followed by the free-text sentinel
    pub fn options(&self) -> Vec<&str> {
        self.cities
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(OTHER_CITY))
            .collect()
    }
}
