//! Session-scoped side-by-side comparison of up to three listings.

use thiserror::Error;

use crate::display::{format_garage, format_lot_size, format_price, format_thousands};
use crate::property::{PropertyId, PropertyRecord};

/// Maximum number of listings that can be compared at once.
pub const MAX_COMPARED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("property {0} is already in comparison")]
    AlreadyPresent(PropertyId),

    #[error("you can only compare up to {capacity} properties at once")]
    CapacityExceeded { capacity: usize },
}

/// What [`ComparisonSet::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// One labelled row of the comparison table; `values[i]` belongs to the
/// `i`-th selected listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

/// An ordered selection of at most [`MAX_COMPARED`] listings with unique ids.
///
/// Insertion order is kept so the table can label columns "Property 1/2/3".
/// A rejected `add` leaves the set unchanged.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    records: Vec<PropertyRecord>,
}

impl ComparisonSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record`.
    ///
    /// # Errors
    ///
    /// - [`ComparisonError::AlreadyPresent`] if a record with the same id is selected.
    /// - [`ComparisonError::CapacityExceeded`] if the set is full.
    pub fn add(&mut self, record: PropertyRecord) -> Result<(), ComparisonError> {
        if self.contains(record.id) {
            return Err(ComparisonError::AlreadyPresent(record.id));
        }
        if self.is_full() {
            return Err(ComparisonError::CapacityExceeded {
                capacity: MAX_COMPARED,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes the listing with `id`. Returns whether anything was removed;
    /// removing an absent id is not an error.
    pub fn remove(&mut self, id: PropertyId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Removes `record` if it is selected, otherwise adds it.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::CapacityExceeded`] when adding to a full set.
    pub fn toggle(&mut self, record: PropertyRecord) -> Result<ToggleOutcome, ComparisonError> {
        if self.remove(record.id) {
            return Ok(ToggleOutcome::Removed);
        }
        self.add(record).map(|()| ToggleOutcome::Added)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_COMPARED
    }

    /// Selected listings in insertion order.
    #[must_use]
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// Builds the side-by-side table. Empty when nothing is selected.
    #[must_use]
    pub fn comparison_rows(&self) -> Vec<ComparisonRow> {
        if self.records.is_empty() {
            return Vec::new();
        }
        let column = |f: fn(&PropertyRecord) -> String| -> Vec<String> {
            self.records.iter().map(f).collect()
        };
        vec![
            ComparisonRow {
                label: "Price",
                values: column(|p| format_price(p.price, p.status)),
            },
            ComparisonRow {
                label: "Location",
                values: column(PropertyRecord::city_state),
            },
            ComparisonRow {
                label: "Bedrooms",
                values: column(|p| p.bedrooms.to_string()),
            },
            ComparisonRow {
                label: "Bathrooms",
                values: column(|p| p.bathrooms.to_string()),
            },
            ComparisonRow {
                label: "Square Feet",
                values: column(|p| format_thousands(u64::from(p.square_feet))),
            },
            ComparisonRow {
                label: "Property Type",
                values: column(|p| p.property_type.label().to_string()),
            },
            ComparisonRow {
                label: "Year Built",
                values: column(|p| p.year_built.to_string()),
            },
            ComparisonRow {
                label: "Lot Size",
                values: column(|p| format_lot_size(p.lot_size)),
            },
            ComparisonRow {
                label: "Garage",
                values: column(|p| format_garage(p.garage)),
            },
        ]
    }
}
