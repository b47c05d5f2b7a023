//! Text formatting shared by listing cards, detail views and the comparison
//! table.

use crate::property::PropertyStatus;

/// Formats an integer with comma thousands separators: `1234567` → `"1,234,567"`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a listing price in whole dollars, with a `/mo` suffix for rentals.
///
/// Negative and non-finite prices render as `$0`.
#[must_use]
pub fn format_price(price: f64, status: PropertyStatus) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dollars = if price.is_finite() && price > 0.0 {
        price.round() as u64
    } else {
        0
    };
    let amount = format_thousands(dollars);
    if status == PropertyStatus::ForRent {
        format!("${amount}/mo")
    } else {
        format!("${amount}")
    }
}

/// `"No properties found"`, `"1 property found"`, `"1,204 properties found"`.
#[must_use]
pub fn results_summary(count: usize) -> String {
    match count {
        0 => "No properties found".to_string(),
        1 => "1 property found".to_string(),
        n => format!("{} properties found", format_thousands(n as u64)),
    }
}

/// Summary line for the favorites view.
#[must_use]
pub fn favorites_summary(count: usize) -> String {
    match count {
        0 => "No favorite properties".to_string(),
        1 => "1 favorite property".to_string(),
        n => format!("{n} favorite properties"),
    }
}

/// `"0.25 acres"`, or `"N/A"` when the lot size does not apply.
#[must_use]
pub fn format_lot_size(acres: f64) -> String {
    if acres > 0.0 {
        format!("{acres} acres")
    } else {
        "N/A".to_string()
    }
}

/// `"2 cars"`, or `"None"` without a garage.
#[must_use]
pub fn format_garage(cars: u32) -> String {
    if cars > 0 {
        format!("{cars} cars")
    } else {
        "None".to_string()
    }
}
