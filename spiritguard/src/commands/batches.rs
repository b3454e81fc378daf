// spiritguard/src/commands/batches.rs
//
// USE CASE: Browse the label registry.

use chrono::NaiveDate;
use serde::Serialize;

use spiritguard_core::application::BatchVerifier;
use spiritguard_core::domain::compliance::{BatchRecord, LedgerStats};

use super::context;
use super::output;
use crate::cli::{CommonArgs, OutputFormat};

#[derive(Serialize)]
struct BatchListing<'a> {
    stats: LedgerStats,
    batches: &'a [BatchRecord],
}

pub fn execute(common: CommonArgs, limit: usize, today: Option<NaiveDate>) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let verifier = BatchVerifier::from_config(&config, context::today_or_now(today))?;

    let records = verifier.ledger().records();
    let listing = BatchListing {
        stats: verifier.stats(),
        batches: &records[..limit.min(records.len())],
    };

    if common.format == OutputFormat::Json {
        return output::print_json(&listing);
    }

    println!(
        "🏷️  {} batches ({} valid, {} invalid)",
        listing.stats.total, listing.stats.valid, listing.stats.invalid
    );
    let mut table = output::table(&[
        "Batch", "Factory", "Product", "Manufactured", "Expires", "Cases", "QR", "Seal",
    ]);
    for b in listing.batches {
        table.add_row(vec![
            b.batch_id.clone(),
            b.factory_id.clone(),
            b.product.clone(),
            b.manufacture_date.to_string(),
            b.expiry_date.to_string(),
            b.quantity_cases.to_string(),
            b.qr_status.to_string(),
            b.seal_status.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
