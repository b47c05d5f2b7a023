//! Listing filter and sort engine.
//!
//! Pure functions over canonical records: no I/O, no panics, and the same
//! input always yields the same output. A record passes when it satisfies
//! every active predicate; only the free-text match ORs across fields.

use std::cmp::Ordering;

use crate::criteria::{FilterCriteria, SortKey};
use crate::property::PropertyRecord;

/// Filters `records` by `criteria` and orders the survivors by
/// `criteria.sort_by`.
///
/// Sorting is stable, so records with equal keys keep their relative order.
#[must_use]
pub fn search(records: Vec<PropertyRecord>, criteria: &FilterCriteria) -> Vec<PropertyRecord> {
    let mut matched: Vec<PropertyRecord> = records
        .into_iter()
        .filter(|record| matches(record, criteria))
        .collect();
    sort_records(&mut matched, criteria.sort_by);
    matched
}

/// Returns `true` if `record` satisfies every predicate in `criteria`.
#[must_use]
pub fn matches(record: &PropertyRecord, criteria: &FilterCriteria) -> bool {
    matches_query(record, &criteria.search_query)
        && criteria.price_min.is_none_or(|min| record.price >= min)
        && criteria.price_max.is_none_or(|max| record.price <= max)
        && criteria
            .bedrooms
            .is_none_or(|min| record.bedrooms >= min)
        && criteria
            .bathrooms
            .is_none_or(|min| record.bathrooms >= f64::from(min))
        && (criteria.property_type.is_empty()
            || criteria.property_type.contains(&record.property_type))
        && (criteria.status.is_empty() || criteria.status.contains(&record.status))
}

/// Case-insensitive substring match against title, city, state and address.
fn matches_query(record: &PropertyRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        record.title.as_str(),
        record.location.city.as_str(),
        record.location.state.as_str(),
        record.location.address.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Sorts `records` in place by `key` using a stable sort.
pub fn sort_records(records: &mut [PropertyRecord], key: SortKey) {
    match key {
        SortKey::PriceLow => records.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => records.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Newest => records.sort_by(|a, b| b.listing_date.cmp(&a.listing_date)),
        SortKey::SquareFeet => records.sort_by(|a, b| b.square_feet.cmp(&a.square_feet)),
        SortKey::Alphabetical => records.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Collates titles ignoring case first, then breaks ties case-sensitively so
/// the order is total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
