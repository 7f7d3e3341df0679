//! Location records as supplied by the record store.
//!
//! The controller treats these as read-only; every piece of interaction state
//! (selection, favorites, expansion) lives in the controller, keyed by id.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, unique identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Direction of a metric compared to the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn arrow(self) -> char {
        match self {
            Self::Up => '\u{2191}',
            Self::Down => '\u{2193}',
        }
    }
}

/// Where a record's report is in its (externally driven) lifecycle.
///
/// `None -> Pending -> Available`. The controller only reads this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Available,
    Pending,
    #[default]
    None,
}

impl ReportStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Pending => "Pending",
            Self::None => "None",
        }
    }

    /// Whether a finished report exists and can be opened.
    pub fn can_view(self) -> bool {
        self == Self::Available
    }

    /// Status after a report has been requested.
    ///
    /// Only the record store and report service use this; a request never
    /// regresses an available report.
    pub fn next_on_create(self) -> Self {
        match self {
            Self::None | Self::Pending => Self::Pending,
            Self::Available => Self::Available,
        }
    }
}

/// The performance metrics shown as table columns, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Visitors,
    Revenue,
    Engagement,
    Satisfaction,
}

impl MetricKind {
    pub fn all() -> &'static [MetricKind] {
        &[
            MetricKind::Visitors,
            MetricKind::Revenue,
            MetricKind::Engagement,
            MetricKind::Satisfaction,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Visitors => "Visitors",
            Self::Revenue => "Revenue",
            Self::Engagement => "Engagement",
            Self::Satisfaction => "Satisfaction",
        }
    }

    /// Format a raw value the way the dashboard displays this metric.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Visitors => group_thousands(value.round() as u64),
            Self::Revenue => format!("${}", group_thousands(value.round() as u64)),
            Self::Engagement | Self::Satisfaction => format!("{value:.1}"),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A single metric value with its trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMetric")]
pub struct Metric {
    pub value: f64,
    pub trend: Trend,
    /// Change against the previous period, 0-100.
    pub percentage: u8,
}

impl Metric {
    pub fn new(value: f64, trend: Trend, percentage: u8) -> Self {
        Self {
            value,
            trend,
            percentage: percentage.min(100),
        }
    }
}

/// Wire form of [`Metric`]. Dashboard dumps name the value `count`,
/// `amount` or `score` and carry the percentage as a plain number.
#[derive(Deserialize)]
struct RawMetric {
    #[serde(alias = "count", alias = "amount", alias = "score")]
    value: f64,
    trend: Trend,
    percentage: f64,
}

impl From<RawMetric> for Metric {
    fn from(raw: RawMetric) -> Self {
        let percentage = if raw.percentage.is_finite() {
            raw.percentage.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Metric::new(raw.value, raw.trend, percentage)
    }
}

/// A business location with its metrics and report status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub detailed_info: String,
    #[serde(default)]
    pub metrics: BTreeMap<MetricKind, Metric>,
    #[serde(default)]
    pub report_status: ReportStatus,
    /// Initial favorite flag; only used to seed the favorite tracker.
    #[serde(default)]
    pub is_favorite: bool,
}

impl Record {
    /// Case-insensitive substring match on name or address.
    ///
    /// `term_lower` must already be lowercase.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.name.to_lowercase().contains(term_lower)
            || self.address.to_lowercase().contains(term_lower)
    }

    pub fn metric(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.get(&kind)
    }
}
