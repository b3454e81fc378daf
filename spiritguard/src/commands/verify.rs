// spiritguard/src/commands/verify.rs
//
// USE CASE: Is this bottle genuine?

use chrono::NaiveDate;

use spiritguard_core::application::BatchVerifier;
use spiritguard_core::domain::compliance::VerificationStatus;

use super::context;
use super::output;
use crate::cli::{CommonArgs, OutputFormat};

pub fn execute(common: CommonArgs, batch_id: String, today: Option<NaiveDate>) -> anyhow::Result<()> {
    let config = context::load_config(&common)?;
    let today = context::today_or_now(today);
    let verifier = BatchVerifier::from_config(&config, today)?;
    let result = verifier.verify(&batch_id, today);

    if common.format == OutputFormat::Json {
        return output::print_json(&result);
    }

    match (&result.status, &result.record) {
        (VerificationStatus::Authentic, Some(record)) => {
            println!("✅ AUTHENTIC - {}", record.product);
        }
        (VerificationStatus::NotFound, _) => {
            println!(
                "⚠️  NOT_FOUND - Batch ID {} not found in database. POSSIBLE COUNTERFEIT",
                result.batch_id
            );
            return Ok(());
        }
        _ => {
            let checks: Vec<&str> = result.failed_checks.iter().map(|c| c.as_str()).collect();
            println!("❌ COUNTERFEIT_OR_EXPIRED ({})", checks.join(", "));
        }
    }

    if let Some(r) = &result.record {
        let mut table = output::table(&["Field", "Value"]);
        table.add_row(vec!["Batch".to_string(), r.batch_id.clone()]);
        table.add_row(vec!["Factory".to_string(), r.factory_id.clone()]);
        table.add_row(vec!["Product".to_string(), r.product.clone()]);
        table.add_row(vec!["Manufactured".to_string(), r.manufacture_date.to_string()]);
        table.add_row(vec!["Expires".to_string(), r.expiry_date.to_string()]);
        table.add_row(vec!["QR".to_string(), r.qr_status.to_string()]);
        table.add_row(vec!["Seal".to_string(), r.seal_status.to_string()]);
        println!("{table}");
    }
    Ok(())
}
