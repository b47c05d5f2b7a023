//! Filter and sort criteria for listing searches.
//!
//! Criteria are built from user input, passed by reference to the search
//! engine, and never mutated by it. They can also be carried in URL-style
//! query pairs so a browse view can be restored from its address.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::property::{PropertyStatus, PropertyType};

/// Upper bound of the browse view's price slider.
pub const BROWSE_PRICE_MAX: f64 = 2_000_000.0;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    #[default]
    Newest,
    SquareFeet,
    /// Ascending by title. Offered by the favorites view.
    Alphabetical,
}

impl SortKey {
    /// Parses a `sortBy` value. Anything unrecognised falls back to
    /// [`SortKey::Newest`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "square-feet" => SortKey::SquareFeet,
            "alphabetical" => SortKey::Alphabetical,
            _ => SortKey::Newest,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::SquareFeet => "square-feet",
            SortKey::Alphabetical => "alphabetical",
        }
    }

    /// Label shown in sort pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Newest => "Newest First",
            SortKey::SquareFeet => "Largest First",
            SortKey::Alphabetical => "A-Z",
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::parse(&value)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A combinable set of listing predicates plus one sort key.
///
/// Every predicate is optional. Empty type/status sets and a blank search
/// query place no constraint on results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Inclusive lower price bound.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    pub price_max: Option<f64>,
    /// Minimum bedroom count.
    pub bedrooms: Option<u32>,
    /// Minimum bathroom count.
    pub bathrooms: Option<u32>,
    pub property_type: BTreeSet<PropertyType>,
    pub status: BTreeSet<PropertyStatus>,
    pub search_query: String,
    pub sort_by: SortKey,
}

impl FilterCriteria {
    /// Criteria the browse view starts with: the full price slider range,
    /// listings that are for sale or for rent, newest first.
    #[must_use]
    pub fn browse_defaults() -> Self {
        Self {
            price_min: Some(0.0),
            price_max: Some(BROWSE_PRICE_MAX),
            status: [PropertyStatus::ForSale, PropertyStatus::ForRent]
                .into_iter()
                .collect(),
            ..Self::default()
        }
    }

    /// Encodes the criteria as query pairs, omitting values that match the
    /// browse defaults, so that [`Self::from_query_pairs`] restores them.
    ///
    /// An empty status set is written out as every status. Both place no
    /// constraint on results, and an omitted `status` would decode to the
    /// browse default.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let query = self.search_query.trim();
        if !query.is_empty() {
            pairs.push(("search", query.to_string()));
        }
        if let Some(min) = self.price_min.filter(|min| *min > 0.0) {
            pairs.push(("priceMin", min.to_string()));
        }
        if let Some(max) = self.price_max.filter(|max| *max != BROWSE_PRICE_MAX) {
            pairs.push(("priceMax", max.to_string()));
        }
        if let Some(bedrooms) = self.bedrooms {
            pairs.push(("bedrooms", bedrooms.to_string()));
        }
        if let Some(bathrooms) = self.bathrooms {
            pairs.push(("bathrooms", bathrooms.to_string()));
        }
        if !self.property_type.is_empty() {
            let types = self.property_type.iter().map(|t| t.as_str());
            pairs.push(("propertyType", join_wire(types)));
        }
        if self.status.is_empty() {
            let every = PropertyStatus::ALL.iter().map(|s| s.as_str());
            pairs.push(("status", join_wire(every)));
        } else if self.status != Self::browse_defaults().status {
            pairs.push(("status", join_wire(self.status.iter().map(|s| s.as_str()))));
        }
        if self.sort_by != SortKey::Newest {
            pairs.push(("sortBy", self.sort_by.as_str().to_string()));
        }
        pairs
    }

    /// Rebuilds criteria from query pairs on top of [`Self::browse_defaults`].
    ///
    /// Unknown keys, unparseable numbers and unknown enum values are ignored.
    #[must_use]
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Self::browse_defaults();
        for (key, value) in pairs {
            match key {
                "search" => criteria.search_query = value.trim().to_string(),
                "priceMin" => {
                    if let Some(min) = parse_price(value) {
                        criteria.price_min = Some(min);
                    }
                }
                "priceMax" => {
                    if let Some(max) = parse_price(value) {
                        criteria.price_max = Some(max);
                    }
                }
                "bedrooms" => criteria.bedrooms = parse_minimum(value),
                "bathrooms" => criteria.bathrooms = parse_minimum(value),
                "propertyType" => {
                    criteria.property_type =
                        value.split(',').filter_map(PropertyType::parse).collect();
                }
                "status" => {
                    criteria.status = value.split(',').filter_map(PropertyStatus::parse).collect();
                }
                "sortBy" => criteria.sort_by = SortKey::parse(value),
                _ => {}
            }
        }
        criteria
    }

    /// Encodes [`Self::to_query_pairs`] as an `application/x-www-form-urlencoded`
    /// query string, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }

    /// Decodes a query string produced by [`Self::to_query_string`]. Accepts
    /// a bare query (`a=1&b=2`), one with a leading `?`, or a full URL.
    #[must_use]
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.trim();
        let query = match Url::parse(raw) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => raw.strip_prefix('?').unwrap_or(raw).to_string(),
        };
        let pairs: Vec<_> = form_urlencoded::parse(query.as_bytes()).collect();
        Self::from_query_pairs(pairs.iter().map(|(key, value)| (key.as_ref(), value.as_ref())))
    }
}

/// Parses a minimum-count field from user input using integer-prefix rules:
/// leading whitespace is skipped and the leading run of digits is read.
///
/// `""` and input without leading digits yield `None`; `"2+"` yields `Some(2)`.
#[must_use]
pub fn parse_minimum(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn join_wire<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
#[path = "criteria_test.rs"]
mod tests;
