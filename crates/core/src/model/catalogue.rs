use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive data attached to a named location.
///
/// Extra fields in the source data are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationDetails {
    pub description: String,
}

impl LocationDetails {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Nested location catalogue: category → location name → details.
///
/// Both levels are kept in sorted order so generated question ids are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCatalogue {
    categories: BTreeMap<String, BTreeMap<String, LocationDetails>>,
}

impl LocationCatalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a location in `category`.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        details: LocationDetails,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), details);
    }

    /// Builder-style variant of [`LocationCatalogue::insert`].
    #[must_use]
    pub fn with_location(
        mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.insert(category, name, LocationDetails::new(description));
        self
    }

    /// Category names in catalogue order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Locations of a single category, if present.
    #[must_use]
    pub fn locations(&self, category: &str) -> Option<&BTreeMap<String, LocationDetails>> {
        self.categories.get(category)
    }

    /// Iterate over `(category, locations)` pairs in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, LocationDetails>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of locations across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
