// spiritguard-core/src/domain/sales/mod.rs

pub mod aggregation;
pub mod geo;
pub mod normalizer;
pub mod record;

pub use aggregation::{
    GrowthSummary, NationalTotal, SalesOverview, StateSummary, YearAggregate, district_trends,
    growth_summary, national_totals, overview, state_summaries,
};
pub use geo::{DistrictLocation, district_distribution};
pub use normalizer::SalesNormalizer;
pub use record::{RawRow, RawTable, SalesDataset, SalesRecord};
