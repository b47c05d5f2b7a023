//! Normalization of raw listing rows into [`PropertyRecord`]s.
//!
//! Every canonical field has its own fallback, so a malformed or missing
//! field degrades to its default and never affects its neighbours.
//! Normalization never fails.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use homefinder_core::{
    Coordinates, Location, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
    DEFAULT_COORDINATES, DEFAULT_TITLE, DEFAULT_YEAR_BUILT, PLACEHOLDER_IMAGE,
};
use serde_json::{Map, Value};

use crate::fields::{lookup, Field};

/// Normalizes a raw listing row from any source into a canonical record.
///
/// Rows that are not JSON objects normalize to a record made entirely of
/// defaults (with id `0`).
#[must_use]
pub fn normalize(raw: &Value) -> PropertyRecord {
    let empty = Map::new();
    let row = raw.as_object().unwrap_or(&empty);
    let get = |field: Field| lookup(row, field);

    PropertyRecord {
        id: get(Field::Id).and_then(parse_id).unwrap_or(0),
        title: get(Field::Title)
            .and_then(parse_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        price: get(Field::Price).and_then(parse_non_negative).unwrap_or(0.0),
        location: Location {
            address: get(Field::Address).and_then(parse_text).unwrap_or_default(),
            city: get(Field::City).and_then(parse_text).unwrap_or_default(),
            state: get(Field::State).and_then(parse_text).unwrap_or_default(),
            zip: get(Field::Zip).and_then(parse_text).unwrap_or_default(),
            coordinates: get(Field::Coordinates)
                .and_then(parse_coordinates)
                .unwrap_or(DEFAULT_COORDINATES),
        },
        bedrooms: get(Field::Bedrooms).and_then(parse_count).unwrap_or(0),
        bathrooms: get(Field::Bathrooms)
            .and_then(parse_non_negative)
            .unwrap_or(0.0),
        square_feet: get(Field::SquareFeet).and_then(parse_count).unwrap_or(0),
        property_type: get(Field::PropertyType)
            .and_then(Value::as_str)
            .and_then(PropertyType::parse)
            .unwrap_or_default(),
        status: get(Field::Status)
            .and_then(Value::as_str)
            .and_then(PropertyStatus::parse)
            .unwrap_or_default(),
        images: normalize_images(get(Field::Images)),
        description: get(Field::Description)
            .and_then(parse_text)
            .unwrap_or_default(),
        features: normalize_features(get(Field::Features)),
        year_built: get(Field::YearBuilt)
            .and_then(parse_year)
            .unwrap_or(DEFAULT_YEAR_BUILT),
        lot_size: get(Field::LotSize).and_then(parse_non_negative).unwrap_or(0.0),
        garage: get(Field::Garage).and_then(parse_count).unwrap_or(0),
        listing_date: get(Field::ListingDate)
            .and_then(parse_listing_date)
            .unwrap_or_default(),
    }
}

/// Reads only the identifier of a raw row. Returns `None` unless the row
/// carries a positive integer id.
#[must_use]
pub fn record_id(raw: &Value) -> Option<PropertyId> {
    raw.as_object()
        .and_then(|row| lookup(row, Field::Id))
        .and_then(parse_id)
}

/// Normalizes an image field into a non-empty ordered list.
///
/// Accepts an array of URLs, a JSON-encoded array string, or a single URL
/// string. Anything else, including an empty list, yields the placeholder.
#[must_use]
pub fn normalize_images(value: Option<&Value>) -> Vec<String> {
    let images = match value {
        Some(Value::Array(items)) => collect_strings(items),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') {
                parse_json_string_array(trimmed).unwrap_or_default()
            } else if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        _ => Vec::new(),
    };

    if images.is_empty() {
        vec![PLACEHOLDER_IMAGE.to_string()]
    } else {
        images
    }
}

/// Normalizes a feature field into a list of unique labels, keeping the
/// first occurrence of each.
#[must_use]
pub fn normalize_features(value: Option<&Value>) -> Vec<String> {
    let labels = match value {
        Some(Value::Array(items)) => collect_strings(items),
        Some(Value::String(s)) => parse_json_string_array(s.trim()).unwrap_or_default(),
        _ => Vec::new(),
    };

    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}

fn collect_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_json_string_array(s: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(s).ok()? {
        Value::Array(items) => Some(collect_strings(&items)),
        _ => None,
    }
}

/// Parses coordinates from an object or a JSON-encoded object string.
/// Both `lat` and `lng` must be present and within range.
fn parse_coordinates(value: &Value) -> Option<Coordinates> {
    let parsed;
    let object = match value {
        Value::Object(map) => map,
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s.trim()).ok()?;
            parsed.as_object()?
        }
        _ => return None,
    };

    let lat = object.get("lat").and_then(parse_number)?;
    let lng = object.get("lng").and_then(parse_number)?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Some(Coordinates { lat, lng })
    } else {
        None
    }
}

/// Reads a finite number from a JSON number or a numeric string.
fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_non_negative(value: &Value) -> Option<f64> {
    parse_number(value).filter(|n| *n >= 0.0)
}

/// Whole, non-negative count; fractional input is truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: &Value) -> Option<u32> {
    parse_non_negative(value)
        .map(f64::trunc)
        .filter(|n| *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_id(value: &Value) -> Option<PropertyId> {
    if let Some(id) = value.as_u64() {
        return (id > 0).then_some(id);
    }
    parse_number(value)
        .map(f64::trunc)
        .filter(|n| *n >= 1.0 && *n < 9.007_199_254_740_992e15)
        .map(|n| n as u64)
}

#[allow(clippy::cast_possible_truncation)]
fn parse_year(value: &Value) -> Option<i32> {
    parse_number(value)
        .map(f64::trunc)
        .filter(|n| (1.0..=9999.0).contains(n))
        .map(|n| n as i32)
}

/// Text fields accept strings (trimmed) and numbers (e.g. numeric zip codes).
fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (read as UTC), `YYYY-MM-DD`, or a
/// number of milliseconds since the Unix epoch.
///
/// Dates outside years 1..=9999 are treated as absent: RFC 3339 cannot
/// represent them, so a normalized record carrying one would not read back.
fn parse_listing_date(value: &Value) -> Option<DateTime<Utc>> {
    parse_any_listing_date(value).filter(|dt| (1..=9999).contains(&dt.year()))
}

fn parse_any_listing_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(naive.and_utc());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
