//! Listing search, detail and browse handlers.

use std::sync::Arc;

use clap::Args;
use homefinder_core::display::{
    format_garage, format_lot_size, format_price, format_thousands, results_summary,
};
use homefinder_core::{
    parse_minimum, FilterCriteria, PropertyId, PropertyRecord, PropertyStatus, PropertyType,
    SortKey,
};
use homefinder_records::{ConfiguredStore, PropertyService, SearchSession};
use homefinder_store::{FavoriteListing, FavoritesLedger, KeyValueStore};
use tokio::io::AsyncBufReadExt;

/// Filter flags shared by `search` and `browse`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Text matched against title, city, state and address
    #[arg(long, short)]
    pub query: Option<String>,
    /// Minimum price (inclusive)
    #[arg(long, value_parser = parse_price)]
    pub price_min: Option<f64>,
    /// Maximum price (inclusive, default 2000000)
    #[arg(long, value_parser = parse_price)]
    pub price_max: Option<f64>,
    /// Minimum bedrooms (e.g. "3" or "3+")
    #[arg(long)]
    pub bedrooms: Option<String>,
    /// Minimum bathrooms (e.g. "2" or "2+")
    #[arg(long)]
    pub bathrooms: Option<String>,
    /// Property types, comma separated (house, condo, townhouse, apartment)
    #[arg(long = "type", value_delimiter = ',', value_parser = parse_property_type)]
    pub property_type: Vec<PropertyType>,
    /// Statuses, comma separated (for-sale, for-rent, sold, pending)
    #[arg(long, value_delimiter = ',', value_parser = parse_property_status)]
    pub status: Vec<PropertyStatus>,
    /// Sort order: price-low, price-high, newest, square-feet, alphabetical
    #[arg(long)]
    pub sort: Option<String>,
    /// Start from a shared query string such as "priceMin=500000&status=for-sale"
    #[arg(long)]
    pub from_url: Option<String>,
}

impl FilterArgs {
    /// Builds criteria from the shared query string, or the browse defaults
    /// when there is none, then applies the explicit flags on top.
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = match &self.from_url {
            Some(url) => FilterCriteria::from_query_string(url),
            None => FilterCriteria::browse_defaults(),
        };
        if let Some(query) = &self.query {
            criteria.search_query = query.trim().to_string();
        }
        if self.price_min.is_some() {
            criteria.price_min = self.price_min;
        }
        if self.price_max.is_some() {
            criteria.price_max = self.price_max;
        }
        if let Some(bedrooms) = &self.bedrooms {
            criteria.bedrooms = parse_minimum(bedrooms);
        }
        if let Some(bathrooms) = &self.bathrooms {
            criteria.bathrooms = parse_minimum(bathrooms);
        }
        if !self.property_type.is_empty() {
            criteria.property_type = self.property_type.iter().copied().collect();
        }
        if !self.status.is_empty() {
            criteria.status = self.status.iter().copied().collect();
        }
        if let Some(sort) = &self.sort {
            criteria.sort_by = SortKey::parse(sort);
        }
        criteria
    }
}

fn parse_property_type(value: &str) -> Result<PropertyType, String> {
    PropertyType::parse(value).ok_or_else(|| {
        format!("unknown property type '{value}'; expected house, condo, townhouse or apartment")
    })
}

fn parse_property_status(value: &str) -> Result<PropertyStatus, String> {
    PropertyStatus::parse(value).ok_or_else(|| {
        format!("unknown status '{value}'; expected for-sale, for-rent, sold or pending")
    })
}

fn parse_price(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(format!("invalid price '{value}'; expected a non-negative number")),
    }
}

/// Search listings and print them as a table or JSON.
///
/// # Errors
///
/// Returns an error if the record store is unavailable.
pub(crate) async fn run_search<K: KeyValueStore>(
    service: &PropertyService<ConfiguredStore>,
    ledger: &FavoritesLedger<K>,
    filters: &FilterArgs,
    json: bool,
) -> anyhow::Result<()> {
    let criteria = filters.to_criteria();
    let results = service.search_properties(&criteria).await?;
    let listings = ledger.annotate(results);

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    print_listing_table(&listings);
    println!();
    println!("{}", results_summary(listings.len()));
    let shared = criteria.to_query_string();
    if !shared.is_empty() {
        println!("Share: ?{shared}");
    }
    Ok(())
}

/// Show a single listing in full.
///
/// # Errors
///
/// Returns an error if the listing does not exist or the record store is
/// unavailable.
pub(crate) async fn run_show<K: KeyValueStore>(
    service: &PropertyService<ConfiguredStore>,
    ledger: &FavoritesLedger<K>,
    id: PropertyId,
    json: bool,
) -> anyhow::Result<()> {
    let property = service
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("property {id} not found"))?;
    let is_favorite = ledger.is_favorite(id);

    if json {
        let listing = FavoriteListing {
            property,
            is_favorite,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    print_detail(&property, is_favorite);
    Ok(())
}

/// Print the property types and statuses filters accept.
pub(crate) fn run_types(service: &PropertyService<ConfiguredStore>) {
    println!("Property types:");
    for property_type in service.property_types() {
        println!("  {:<11}{}", property_type.as_str(), property_type.label());
    }
    println!("Statuses:");
    for status in service.status_types() {
        println!("  {:<11}{}", status.as_str(), status.label());
    }
    println!("Sort orders:");
    for key in [
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::SquareFeet,
        SortKey::Alphabetical,
    ] {
        println!("  {:<13}{}", key.as_str(), key.label());
    }
}

/// Interactive search: every line read from stdin replaces the search text.
///
/// Input is debounced, and results from a search that was superseded while
/// in flight are dropped, so only the latest query is printed.
///
/// # Errors
///
/// Returns an error if stdin cannot be read. Store failures are printed and
/// browsing continues.
pub(crate) async fn run_browse<K: KeyValueStore + 'static>(
    service: Arc<PropertyService<ConfiguredStore>>,
    ledger: Arc<FavoritesLedger<K>>,
    filters: &FilterArgs,
    session: Arc<SearchSession>,
) -> anyhow::Result<()> {
    let base = filters.to_criteria();
    println!("Type a search and press enter; an empty line clears it. Ctrl-D quits.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut searches = tokio::task::JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let criteria = FilterCriteria {
            search_query: line.trim().to_string(),
            ..base.clone()
        };
        let service = Arc::clone(&service);
        let ledger = Arc::clone(&ledger);
        let session = Arc::clone(&session);
        searches.spawn(async move {
            let query = criteria.search_query.clone();
            match session.run(&*service, criteria).await {
                None => {}
                Some(Ok(results)) => {
                    println!("\n> {query}");
                    print_listing_table(&ledger.annotate(results.clone()));
                    println!("{}", results_summary(results.len()));
                }
                Some(Err(error)) => {
                    eprintln!("search failed: {error}. Press enter to retry.");
                }
            }
        });
    }

    while searches.join_next().await.is_some() {}
    Ok(())
}

pub(crate) fn print_listing_table(listings: &[FavoriteListing]) {
    if listings.is_empty() {
        return;
    }
    println!(
        "{:<6}{:<16}{:<6}{:<7}{:<9}{:<11}{:<10}{:<5}TITLE",
        "ID", "PRICE", "BEDS", "BATHS", "SQFT", "TYPE", "STATUS", "FAV"
    );
    for listing in listings {
        let p = &listing.property;
        println!(
            "{:<6}{:<16}{:<6}{:<7}{:<9}{:<11}{:<10}{:<5}{}",
            p.id,
            format_price(p.price, p.status),
            p.bedrooms,
            p.bathrooms,
            format_thousands(u64::from(p.square_feet)),
            p.property_type.label(),
            p.status.label(),
            if listing.is_favorite { "*" } else { "" },
            truncate(&p.title, 40),
        );
    }
}

fn print_detail(p: &PropertyRecord, is_favorite: bool) {
    let star = if is_favorite { " [favorite]" } else { "" };
    println!("{} (#{}){star}", p.title, p.id);
    println!("{}", format_price(p.price, p.status));
    println!(
        "{}, {}, {} {}",
        p.location.address, p.location.city, p.location.state, p.location.zip
    );
    println!("{} | {}", p.status.label(), p.property_type.label());
    println!();
    println!("Bedrooms:    {}", p.bedrooms);
    println!("Bathrooms:   {}", p.bathrooms);
    println!("Square feet: {}", format_thousands(u64::from(p.square_feet)));
    println!("Year built:  {}", p.year_built);
    println!("Lot size:    {}", format_lot_size(p.lot_size));
    println!("Garage:      {}", format_garage(p.garage));
    println!("Listed:      {}", p.listing_date.format("%Y-%m-%d"));
    println!(
        "Location:    {:.4}, {:.4}",
        p.location.coordinates.lat, p.location.coordinates.lng
    );
    if !p.description.is_empty() {
        println!();
        println!("{}", p.description);
    }
    if !p.features.is_empty() {
        println!();
        println!("Features: {}", p.features.join(", "));
    }
    println!();
    println!("Images:");
    for image in &p.images {
        println!("  {image}");
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_shared_query_string() {
        let filters = FilterArgs {
            from_url: Some("?priceMin=100000&search=lake+view&sortBy=price-low".to_string()),
            price_min: Some(250_000.0),
            ..FilterArgs::default()
        };
        let criteria = filters.to_criteria();
        assert_eq!(criteria.price_min, Some(250_000.0));
        assert_eq!(criteria.search_query, "lake view");
        assert_eq!(criteria.sort_by, SortKey::PriceLow);
    }

    #[test]
    fn minimum_flags_use_integer_prefix() {
        let filters = FilterArgs {
            bedrooms: Some("3+".to_string()),
            bathrooms: Some("any".to_string()),
            ..FilterArgs::default()
        };
        let criteria = filters.to_criteria();
        assert_eq!(criteria.bedrooms, Some(3));
        assert_eq!(criteria.bathrooms, None);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let filters = FilterArgs {
            sort: Some("cheapest".to_string()),
            ..FilterArgs::default()
        };
        assert_eq!(filters.to_criteria().sort_by, SortKey::Newest);
    }

    #[test]
    fn search_without_flags_starts_from_browse_defaults() {
        assert_eq!(FilterArgs::default().to_criteria(), FilterCriteria::browse_defaults());
    }

    #[test]
    fn shared_query_replays_to_the_same_criteria() {
        let cases = [
            FilterArgs {
                query: Some("austin".to_string()),
                ..FilterArgs::default()
            },
            FilterArgs {
                query: Some("Smith & Sons 100%".to_string()),
                price_max: Some(3_000_000.0),
                status: PropertyStatus::ALL.to_vec(),
                ..FilterArgs::default()
            },
            FilterArgs {
                price_min: Some(0.0),
                bedrooms: Some("2+".to_string()),
                property_type: vec![PropertyType::Condo],
                status: vec![PropertyStatus::Sold],
                sort: Some("alphabetical".to_string()),
                ..FilterArgs::default()
            },
        ];
        for filters in cases {
            let criteria = filters.to_criteria();
            let replay = FilterArgs {
                from_url: Some(format!("?{}", criteria.to_query_string())),
                ..FilterArgs::default()
            };
            assert_eq!(replay.to_criteria(), criteria);
        }
    }

    #[test]
    fn price_parser_rejects_non_finite_and_negative_values() {
        assert_eq!(parse_price(" 450000 "), Ok(450_000.0));
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("cheap").is_err());
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcde...");
    }
}
