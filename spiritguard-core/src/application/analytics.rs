// spiritguard-core/src/application/analytics.rs

use tracing::{info, instrument, warn};

use crate::domain::reference::CityDirectory;
use crate::domain::sales::{
    DistrictLocation, GrowthSummary, NationalTotal, SalesDataset, SalesNormalizer,
    SalesOverview, SalesRecord, StateSummary, YearAggregate, aggregation, district_distribution,
};
use crate::infrastructure::tabular::{TextEncoding, decode_text, read_table};
use crate::ports::SalesSource;

/// A loaded sales snapshot plus the read-only projections the dashboards use.
///
/// Loading never fails: an absent, unreadable or unparsable source yields an
/// empty dataset and a warning.
#[derive(Debug, Clone)]
pub struct SalesAnalytics {
    dataset: SalesDataset,
    origin: String,
    encoding: Option<TextEncoding>,
}

impl SalesAnalytics {
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn load(source: &dyn SalesSource, normalizer: &SalesNormalizer) -> Self {
        let origin = source.describe();

        let bytes = match source.fetch() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!("No sales data available");
                return Self::from_dataset(SalesDataset::Empty, origin);
            }
            Err(e) => {
                warn!(error = %e, "Could not read sales data");
                return Self::from_dataset(SalesDataset::Empty, origin);
            }
        };

        let (text, encoding) = decode_text(&bytes);
        let table = match read_table(&text) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Could not parse sales data");
                return Self::from_dataset(SalesDataset::Empty, origin);
            }
        };
        info!(rows = table.len(), %encoding, "✓ Loaded sales file");

        Self {
            dataset: normalizer.normalize(table),
            origin,
            encoding: Some(encoding),
        }
    }

    pub fn from_dataset(dataset: SalesDataset, origin: impl Into<String>) -> Self {
        Self {
            dataset,
            origin: origin.into(),
            encoding: None,
        }
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn records(&self) -> &[SalesRecord] {
        self.dataset.records()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    pub fn overview(&self) -> SalesOverview {
        aggregation::overview(self.records())
    }

    pub fn district_trends(&self) -> Vec<YearAggregate> {
        aggregation::district_trends(self.records())
    }

    pub fn state_summaries(&self) -> Vec<StateSummary> {
        aggregation::state_summaries(self.records())
    }

    pub fn national_totals(&self) -> Vec<NationalTotal> {
        aggregation::national_totals(self.records())
    }

    pub fn growth_summary(&self) -> Option<GrowthSummary> {
        aggregation::growth_summary(&self.national_totals())
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.records().iter().map(|r| r.year).max()
    }

    pub fn district_distribution(&self, year: i32, cities: &CityDirectory) -> Vec<DistrictLocation> {
        district_distribution(self.records(), year, cities)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SpiritGuardError;

    struct InMemory(Option<Vec<u8>>);

    impl SalesSource for InMemory {
        fn fetch(&self) -> Result<Option<Vec<u8>>, SpiritGuardError> {
            Ok(self.0.clone())
        }
        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    struct Broken;

    impl SalesSource for Broken {
        fn fetch(&self) -> Result<Option<Vec<u8>>, SpiritGuardError> {
            Err(SpiritGuardError::InternalError("disk on fire".into()))
        }
        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_load_wide_cp1252_file() {
        let bytes = b"Sl No,District,Sale 2015-16,Sale 2016-17\n1,Mysore,100,150\n2,Bel\xe9gavi,80,40\n";
        let analytics =
            SalesAnalytics::load(&InMemory(Some(bytes.to_vec())), &SalesNormalizer::default());

        assert_eq!(analytics.encoding(), Some(TextEncoding::Cp1252));
        assert_eq!(analytics.records().len(), 4);
        assert!(analytics.records().iter().any(|r| r.district == "Belégavi"));
        assert_eq!(analytics.latest_year(), Some(2016));

        let growth = analytics.growth_summary().unwrap();
        assert_eq!(growth.first_total, 180.0);
        assert_eq!(growth.last_total, 190.0);
    }

    #[test]
    fn test_absent_and_broken_sources_are_empty() {
        let normalizer = SalesNormalizer::default();
        let absent = SalesAnalytics::load(&InMemory(None), &normalizer);
        assert_eq!(absent.dataset(), &SalesDataset::Empty);
        assert!(absent.district_trends().is_empty());

        let broken = SalesAnalytics::load(&Broken, &normalizer);
        assert_eq!(broken.dataset(), &SalesDataset::Empty);
        assert_eq!(broken.overview().records, 0);
    }
}
