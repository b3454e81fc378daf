// spiritguard/src/commands/output.rs

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

/// Liters with thousands separators, no decimals.
pub fn liters(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:+.1}%", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liters_grouping() {
        assert_eq!(liters(0.0), "0");
        assert_eq!(liters(999.4), "999");
        assert_eq!(liters(1234567.0), "1,234,567");
        assert_eq!(liters(-1500.0), "-1,500");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(12.345)), "+12.3%");
        assert_eq!(percent(Some(-4.0)), "-4.0%");
        assert_eq!(percent(None), "-");
    }
}
