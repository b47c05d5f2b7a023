use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a listing by the record store.
pub type PropertyId = u64;

/// Image shown when a listing has no usable image references.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=800&h=600&fit=crop";

/// Fallback point (geographic centre of the contiguous US) for listings
/// without usable coordinates.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    lat: 39.8283,
    lng: -98.5795,
};

pub const DEFAULT_YEAR_BUILT: i32 = 2000;

pub const DEFAULT_TITLE: &str = "Untitled Property";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    House,
    Condo,
    Townhouse,
    Apartment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Apartment,
    ];

    /// Parses a wire value such as `"condo"`. Case and surrounding whitespace
    /// are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "house" => Some(PropertyType::House),
            "condo" => Some(PropertyType::Condo),
            "townhouse" => Some(PropertyType::Townhouse),
            "apartment" => Some(PropertyType::Apartment),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Apartment => "apartment",
        }
    }

    /// Human-readable label, e.g. `"Townhouse"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    #[default]
    ForSale,
    ForRent,
    Sold,
    Pending,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 4] = [
        PropertyStatus::ForSale,
        PropertyStatus::ForRent,
        PropertyStatus::Sold,
        PropertyStatus::Pending,
    ];

    /// Parses a wire value such as `"for-rent"`. Case and surrounding
    /// whitespace are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "for-sale" => Some(PropertyStatus::ForSale),
            "for-rent" => Some(PropertyStatus::ForRent),
            "sold" => Some(PropertyStatus::Sold),
            "pending" => Some(PropertyStatus::Pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "for-sale",
            PropertyStatus::ForRent => "for-rent",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Pending => "pending",
        }
    }

    /// Badge label, e.g. `"For Rent"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "For Sale",
            PropertyStatus::ForRent => "For Rent",
            PropertyStatus::Sold => "Sold",
            PropertyStatus::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Default for Coordinates {
    fn default() -> Self {
        DEFAULT_COORDINATES
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub coordinates: Coordinates,
}

/// A listing in canonical form.
///
/// Records are only ever produced by the field normalizer in
/// `homefinder-records`, so every field is populated. Whether the listing is a
/// favorite is not part of the record; see `homefinder-store`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub title: String,
    /// USD. Monthly rent when `status` is `for-rent`, total price otherwise.
    pub price: f64,
    pub location: Location,
    pub bedrooms: u32,
    /// May be fractional (e.g. `1.5`).
    pub bathrooms: f64,
    pub square_feet: u32,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    /// Never empty.
    pub images: Vec<String>,
    pub description: String,
    pub features: Vec<String>,
    pub year_built: i32,
    /// Acres; `0` means not applicable.
    pub lot_size: f64,
    /// Car spaces; `0` means none.
    pub garage: u32,
    pub listing_date: DateTime<Utc>,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            id: 0,
            title: DEFAULT_TITLE.to_string(),
            price: 0.0,
            location: Location::default(),
            bedrooms: 0,
            bathrooms: 0.0,
            square_feet: 0,
            property_type: PropertyType::default(),
            status: PropertyStatus::default(),
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            description: String::new(),
            features: Vec::new(),
            year_built: DEFAULT_YEAR_BUILT,
            lot_size: 0.0,
            garage: 0,
            listing_date: DateTime::<Utc>::default(),
        }
    }
}

impl PropertyRecord {
    /// Returns the first image, which listing cards use as the cover.
    #[must_use]
    pub fn cover_image(&self) -> &str {
        self.images.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Returns `true` when the price is a monthly rent.
    #[must_use]
    pub fn is_rental(&self) -> bool {
        self.status == PropertyStatus::ForRent
    }

    /// `"City, ST"` as shown on cards and in the comparison table.
    #[must_use]
    pub fn city_state(&self) -> String {
        format!("{}, {}", self.location.city, self.location.state)
    }
}
