//! Field-name mapping between raw listing rows and canonical fields.
//!
//! ## Observed row shapes
//!
//! ### Bundled dataset
//! camelCase keys with a capitalised `Id`, a nested `location` object using
//! `zipCode`, and real arrays for `images` and `features`.
//!
//! ### Record service
//! Flat, `_c`-suffixed custom fields (`price_c`, `city_c`, ...). Array-valued
//! fields (`images_c`, `features_c`) and `coordinates_c` arrive as
//! JSON-encoded strings, or as a bare URL for single-image listings.
//!
//! ### Canonical
//! The serialized form of `PropertyRecord` (camelCase, `id`, nested
//! `location` with `zip`). It is listed first everywhere so normalizing a
//! normalized record is a no-op.

use serde_json::{Map, Value};

/// Every canonical field the normalizer fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    Price,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    PropertyType,
    Status,
    Images,
    Description,
    Features,
    YearBuilt,
    LotSize,
    Garage,
    ListingDate,
    Address,
    City,
    State,
    Zip,
    Coordinates,
}

impl Field {
    pub const ALL: [Field; 20] = [
        Field::Id,
        Field::Title,
        Field::Price,
        Field::Bedrooms,
        Field::Bathrooms,
        Field::SquareFeet,
        Field::PropertyType,
        Field::Status,
        Field::Images,
        Field::Description,
        Field::Features,
        Field::YearBuilt,
        Field::LotSize,
        Field::Garage,
        Field::ListingDate,
        Field::Address,
        Field::City,
        Field::State,
        Field::Zip,
        Field::Coordinates,
    ];

    /// Accepted source keys, in priority order.
    #[must_use]
    pub fn sources(self) -> &'static [&'static str] {
        match self {
            Field::Id => &["id", "Id", "ID"],
            Field::Title => &["title", "title_c", "Name"],
            Field::Price => &["price", "price_c"],
            Field::Bedrooms => &["bedrooms", "bedrooms_c"],
            Field::Bathrooms => &["bathrooms", "bathrooms_c"],
            Field::SquareFeet => &["squareFeet", "square_feet_c", "squareFeet_c"],
            Field::PropertyType => &["propertyType", "property_type_c", "propertyType_c"],
            Field::Status => &["status", "status_c"],
            Field::Images => &["images", "images_c"],
            Field::Description => &["description", "description_c"],
            Field::Features => &["features", "features_c"],
            Field::YearBuilt => &["yearBuilt", "year_built_c", "yearBuilt_c"],
            Field::LotSize => &["lotSize", "lot_size_c", "lotSize_c"],
            Field::Garage => &["garage", "garage_c"],
            Field::ListingDate => &["listingDate", "listing_date_c", "listingDate_c", "CreatedOn"],
            Field::Address => &["address", "address_c"],
            Field::City => &["city", "city_c"],
            Field::State => &["state", "state_c"],
            Field::Zip => &["zip", "zipCode", "zip_c", "zip_code_c"],
            Field::Coordinates => &["coordinates", "coordinates_c"],
        }
    }

    /// Location parts may be nested under `location` or flat on the row.
    #[must_use]
    pub fn is_location(self) -> bool {
        matches!(
            self,
            Field::Address | Field::City | Field::State | Field::Zip | Field::Coordinates
        )
    }
}

/// Key under which the bundled and canonical shapes nest location parts.
pub const LOCATION_KEY: &str = "location";

/// Returns the first non-null value for `field`.
///
/// Location parts are looked up in the nested `location` object first, then
/// on the row itself.
#[must_use]
pub fn lookup(row: &Map<String, Value>, field: Field) -> Option<&Value> {
    if field.is_location() {
        if let Some(found) = row
            .get(LOCATION_KEY)
            .and_then(Value::as_object)
            .and_then(|nested| first_present(nested, field))
        {
            return Some(found);
        }
    }
    first_present(row, field)
}

fn first_present(map: &Map<String, Value>, field: Field) -> Option<&Value> {
    field
        .sources()
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn every_field_has_at_least_one_source() {
        for field in Field::ALL {
            assert!(!field.sources().is_empty(), "{field:?} has no sources");
        }
    }

    #[test]
    fn lookup_prefers_canonical_key() {
        let row = as_map(json!({ "price": 10, "price_c": 20 }));
        assert_eq!(lookup(&row, Field::Price), Some(&json!(10)));
    }

    #[test]
    fn lookup_skips_null_values() {
        let row = as_map(json!({ "price": null, "price_c": 20 }));
        assert_eq!(lookup(&row, Field::Price), Some(&json!(20)));
    }

    #[test]
    fn lookup_reads_nested_location_first() {
        let row = as_map(json!({
            "city_c": "Flat City",
            "location": { "city": "Nested City", "zipCode": "02110" }
        }));
        assert_eq!(lookup(&row, Field::City), Some(&json!("Nested City")));
        assert_eq!(lookup(&row, Field::Zip), Some(&json!("02110")));
    }

    #[test]
    fn lookup_falls_back_to_flat_location_keys() {
        let row = as_map(json!({ "location": {}, "state_c": "CO" }));
        assert_eq!(lookup(&row, Field::State), Some(&json!("CO")));
    }

    #[test]
    fn lookup_missing_field_is_none() {
        let row = as_map(json!({ "title": "x" }));
        assert_eq!(lookup(&row, Field::Garage), None);
    }
}
