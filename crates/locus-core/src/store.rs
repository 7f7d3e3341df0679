//! The record store the controller reads from.
//!
//! Sources produce an ordered sequence of records; [`InMemoryStore`] is the
//! mutable copy the presentation layer owns (deletes, report status changes)
//! and re-feeds to the controller after each change.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::CoreError;
use crate::model::{Metric, MetricKind, Record, RecordId, ReportStatus, Trend};

/// Something that can supply the full record sequence.
pub trait LocationSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<Vec<Record>, CoreError>;
}

/// Stub data service: sixty generated locations with random metrics.
#[derive(Debug, Clone, Default)]
pub struct MockLocations {
    seed: Option<u64>,
    count: Option<usize>,
}

/// Total records generated when no count is given.
const MOCK_TOTAL: usize = 60;

impl MockLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed RNG seed so metrics are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate `count` records instead of the default sixty.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    fn generate(&self) -> Vec<Record> {
        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let total = self.count.unwrap_or(MOCK_TOTAL);

        let fixed: [(&str, &str, &str, bool); 4] = [
            (
                "Staysure",
                "Northampton, NN4 7XD",
                "Premium insurance provider specializing in travel services for all ages.",
                false,
            ),
            (
                "Villaggio Italiano",
                "Hartsdale, 10530",
                "Authentic Italian restaurant with traditional cuisine and warm atmosphere.",
                true,
            ),
            (
                "Staysure",
                "Northampton, NN4 7XD",
                "Insurance services for travelers and seniors with special coverage options.",
                false,
            ),
            (
                "Villaggio Italiano",
                "Hartsdale, 10530",
                "Family-owned Italian restaurant serving homemade pasta and wood-fired pizza.",
                true,
            ),
        ];

        let mut records = Vec::with_capacity(total);
        for n in 1..=total {
            let (name, address, info, favorite) = match fixed.get(n - 1) {
                Some(&row) => row,
                None if n % 2 == 0 => (
                    "Villaggio Italiano",
                    "Hartsdale, 10530",
                    "Italian restaurant with authentic cuisine and family recipes.",
                    n % 5 == 0,
                ),
                None => (
                    "Staysure",
                    "Northampton, NN4 7XD",
                    "Insurance provider with specialized travel coverage options.",
                    n % 5 == 0,
                ),
            };
            records.push(Record {
                id: RecordId::new(n.to_string()),
                name: name.to_string(),
                address: address.to_string(),
                detailed_info: info.to_string(),
                metrics: random_metrics(&mut rng),
                report_status: ReportStatus::None,
                is_favorite: favorite,
            });
        }
        records
    }
}

fn random_trend(rng: &mut fastrand::Rng) -> Trend {
    if rng.bool() { Trend::Up } else { Trend::Down }
}

fn random_metrics(rng: &mut fastrand::Rng) -> BTreeMap<MetricKind, Metric> {
    let mut metrics = BTreeMap::new();
    metrics.insert(
        MetricKind::Visitors,
        Metric::new(rng.u32(0..10_000) as f64, random_trend(rng), rng.u8(0..20)),
    );
    metrics.insert(
        MetricKind::Revenue,
        Metric::new(rng.u32(0..50_000) as f64, random_trend(rng), rng.u8(0..25)),
    );
    metrics.insert(
        MetricKind::Engagement,
        Metric::new(rng.f64() * 10.0, random_trend(rng), rng.u8(0..15)),
    );
    metrics.insert(
        MetricKind::Satisfaction,
        Metric::new(1.0 + rng.f64() * 4.0, random_trend(rng), rng.u8(0..10)),
    );
    metrics
}

impl LocationSource for MockLocations {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&self) -> Result<Vec<Record>, CoreError> {
        Ok(self.generate())
    }
}

/// Records loaded from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationSource for JsonFileSource {
    fn name(&self) -> &str {
        "json"
    }

    fn fetch(&self) -> Result<Vec<Record>, CoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<Record> = serde_json::from_str(&content)?;
        tracing::info!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }
}

/// Mutable, in-process record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
}

impl InMemoryStore {
    pub fn new(records: Vec<Record>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CoreError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn from_source(source: &dyn LocationSource) -> Result<Self, CoreError> {
        Self::new(source.fetch()?)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Owned copy of the sequence, for handing to a controller.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id.as_str() == id)
    }

    /// Remove every record whose id is in `ids`. Returns how many were removed.
    pub fn remove(&mut self, ids: &[RecordId]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(|id| id.as_str()).collect();
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(r.id.as_str()));
        before - self.records.len()
    }

    /// Set a record's report status. Returns false for an unknown id.
    pub fn set_report_status(&mut self, id: &str, status: ReportStatus) -> bool {
        match self.records.iter_mut().find(|r| r.id.as_str() == id) {
            Some(record) => {
                record.report_status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mock_generates_sixty_unique_locations() {
        let records = MockLocations::new().with_seed(7).fetch().unwrap();
        assert_eq!(records.len(), 60);
        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 60);
        assert_eq!(records[0].name, "Staysure");
        assert_eq!(records[1].name, "Villaggio Italiano");
        assert!(records[1].is_favorite);
        // Generated rows alternate by parity; every fifth is a favorite.
        assert_eq!(records[9].name, "Villaggio Italiano");
        assert!(records[9].is_favorite);
        assert!(!records[10].is_favorite);
        assert!(records.iter().all(|r| r.report_status == ReportStatus::None));
        assert!(records.iter().all(|r| r.metrics.len() == 4));
    }

    #[test]
    fn seeded_mock_is_deterministic() {
        let a = MockLocations::new().with_seed(42).fetch().unwrap();
        let b = MockLocations::new().with_seed(42).fetch().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mock_count_override() {
        let records = MockLocations::new().with_count(3).fetch().unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn json_source_round_trips_mock_data() {
        let records = MockLocations::new().with_seed(1).with_count(5).fetch().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let loaded = JsonFileSource::new(file.path()).fetch().unwrap();
        assert_eq!(loaded.len(), 5);
        assert_eq!(loaded[2].id, records[2].id);
        assert_eq!(loaded[2].name, records[2].name);
    }

    #[test]
    fn json_source_reports_bad_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            JsonFileSource::new(file.path()).fetch(),
            Err(CoreError::Json(_))
        ));
        assert!(matches!(
            JsonFileSource::new("/definitely/not/here.json").fetch(),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn store_remove_and_status_updates() {
        let mut store =
            InMemoryStore::from_source(&MockLocations::new().with_seed(3).with_count(6)).unwrap();
        assert_eq!(store.remove(&[RecordId::new("2"), RecordId::new("99")]), 1);
        assert_eq!(store.len(), 5);
        assert!(store.get("2").is_none());

        assert!(store.set_report_status("3", ReportStatus::Pending));
        assert_eq!(store.get("3").unwrap().report_status, ReportStatus::Pending);
        assert!(!store.set_report_status("2", ReportStatus::Pending));
    }

    #[test]
    fn store_rejects_duplicates() {
        let mut records = MockLocations::new().with_count(2).fetch().unwrap();
        records[1].id = records[0].id.clone();
        assert!(matches!(
            InMemoryStore::new(records),
            Err(CoreError::DuplicateId(_))
        ));
    }
}
