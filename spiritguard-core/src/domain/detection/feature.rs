// spiritguard-core/src/domain/detection/feature.rs

use crate::domain::sales::normalizer::coerce_sale;
use crate::domain::sales::{RawRow, SalesRecord, YearAggregate};

/// Name of the sale-volume feature, as it appears in normalized data.
pub const SALE_FEATURE: &str = "sale_in_liters";

/// A row the outlier detector can read a numeric feature from.
pub trait FeatureRow {
    /// Whether the row's schema carries `column` at all.
    fn has_feature(&self, column: &str) -> bool;

    /// The value, `None` when absent or blank (the detector fills it with 0).
    fn feature(&self, column: &str) -> Option<f64>;
}

impl FeatureRow for YearAggregate {
    fn has_feature(&self, column: &str) -> bool {
        matches!(column, SALE_FEATURE | "sale_in_liters_sum")
    }

    fn feature(&self, column: &str) -> Option<f64> {
        self.has_feature(column).then_some(self.sale_in_liters_sum)
    }
}

impl FeatureRow for SalesRecord {
    fn has_feature(&self, column: &str) -> bool {
        column == SALE_FEATURE
    }

    fn feature(&self, column: &str) -> Option<f64> {
        self.has_feature(column).then_some(self.sale_in_liters)
    }
}

impl FeatureRow for RawRow<'_> {
    fn has_feature(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    fn feature(&self, column: &str) -> Option<f64> {
        self.get(column)
            .filter(|v| !v.trim().is_empty())
            .map(coerce_sale)
    }
}
