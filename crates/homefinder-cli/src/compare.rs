//! Side-by-side comparison handler.

use homefinder_core::{ComparisonSet, PropertyId};
use homefinder_records::{ConfiguredStore, PropertyService};

const LABEL_WIDTH: usize = 14;
const COLUMN_WIDTH: usize = 28;

/// Compare up to three listings.
///
/// Ids that do not exist, repeat an earlier id, or exceed the comparison
/// capacity are reported and skipped, the way the compare view rejects them
/// with a notice.
///
/// # Errors
///
/// Returns an error if the record store is unavailable or no listing could
/// be selected.
pub(crate) async fn run_compare(
    service: &PropertyService<ConfiguredStore>,
    ids: &[PropertyId],
) -> anyhow::Result<()> {
    let mut set = ComparisonSet::new();

    for &id in ids {
        let Some(property) = service.get_by_id(id).await? else {
            eprintln!("notice: property {id} not found; skipped");
            continue;
        };
        if let Err(rejection) = set.add(property) {
            eprintln!("notice: {rejection}; skipped {id}");
        }
    }

    if set.is_empty() {
        anyhow::bail!("no properties to compare");
    }

    print!("{:<LABEL_WIDTH$}", "");
    for index in 1..=set.len() {
        print!("{:<COLUMN_WIDTH$}", format!("Property {index}"));
    }
    println!();

    print!("{:<LABEL_WIDTH$}", "Title");
    for record in set.records() {
        print!("{:<COLUMN_WIDTH$}", clip(&record.title));
    }
    println!();

    for row in set.comparison_rows() {
        print!("{:<LABEL_WIDTH$}", row.label);
        for value in &row.values {
            print!("{:<COLUMN_WIDTH$}", clip(value));
        }
        println!();
    }
    Ok(())
}

fn clip(text: &str) -> String {
    let max = COLUMN_WIDTH - 2;
    if text.chars().count() > max {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
