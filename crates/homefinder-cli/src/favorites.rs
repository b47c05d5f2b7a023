//! Favorites command handlers.

use clap::Subcommand;
use homefinder_core::display::favorites_summary;
use homefinder_core::{sort_records, PropertyId, SortKey};
use homefinder_records::{ConfiguredStore, PropertyService};
use homefinder_store::{FavoritesLedger, KeyValueStore};

use crate::listings::print_listing_table;

/// Sub-commands available under `favorites`.
#[derive(Debug, Subcommand)]
pub enum FavoritesCommands {
    /// List favorited properties
    List {
        /// Sort order (newest, price-low, price-high, square-feet, alphabetical);
        /// newest when omitted
        #[arg(long)]
        sort: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a property to favorites, or remove it if already there
    Toggle {
        /// Property id
        id: PropertyId,
    },
}

/// List favorited listings that still exist in the record store.
///
/// # Errors
///
/// Returns an error if the record store is unavailable.
pub(crate) async fn run_favorites_list<K: KeyValueStore>(
    service: &PropertyService<ConfiguredStore>,
    ledger: &FavoritesLedger<K>,
    sort: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let all = service.get_all().await?;
    let mut favorites = ledger.favorites_among(all);
    sort_records(&mut favorites, favorites_sort(sort));
    let listings = ledger.annotate(favorites);

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    println!("{}", favorites_summary(listings.len()));
    if listings.is_empty() {
        println!("Use `favorites toggle <id>` to save a property.");
        return Ok(());
    }
    println!();
    print_listing_table(&listings);
    Ok(())
}

fn favorites_sort(sort: Option<&str>) -> SortKey {
    sort.map_or(SortKey::Newest, SortKey::parse)
}

/// Toggle a listing's favorite state.
///
/// # Errors
///
/// Returns an error if the listing does not exist, the record store is
/// unavailable, or the favorites slot cannot be written.
pub(crate) async fn run_favorites_toggle<K: KeyValueStore>(
    service: &PropertyService<ConfiguredStore>,
    ledger: &FavoritesLedger<K>,
    id: PropertyId,
) -> anyhow::Result<()> {
    let property = service
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("property {id} not found"))?;

    let subscription = ledger.subscribe(|change| {
        tracing::info!(
            id = change.id,
            is_favorite = change.is_favorite,
            count = change.count,
            "favorites updated"
        );
    });
    let is_favorite = ledger.toggle_favorite(id);
    ledger.unsubscribe(subscription);

    if is_favorite? {
        println!("Added \"{}\" to favorites", property.title);
    } else {
        println!("Removed \"{}\" from favorites", property.title);
    }
    println!("Favorites: {}", ledger.count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorites_default_to_newest_first() {
        assert_eq!(favorites_sort(None), SortKey::Newest);
        assert_eq!(favorites_sort(Some("price-high")), SortKey::PriceHigh);
        assert_eq!(favorites_sort(Some("bogus")), SortKey::Newest);
    }
}
