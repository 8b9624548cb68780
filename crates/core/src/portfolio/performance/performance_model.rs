use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A period as it arrives from the upstream history payload, before its date
/// has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPeriod {
    /// Bare date string; its original index is its position in the list.
    Bare { position: usize, date: String },
    /// `[index, "date"]` pair carrying its own original index.
    Indexed { index: usize, date: String },
}

impl RawPeriod {
    pub fn original_index(&self) -> usize {
        match self {
            RawPeriod::Bare { position, .. } => *position,
            RawPeriod::Indexed { index, .. } => *index,
        }
    }

    pub fn date_text(&self) -> &str {
        match self {
            RawPeriod::Bare { date, .. } | RawPeriod::Indexed { date, .. } => date,
        }
    }
}

/// A period that survived date parsing and window filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntry {
    pub original_index: usize,
    pub date: NaiveDate,
}

/// Periods kept by the window filter, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowedPeriods {
    pub entries: Vec<PeriodEntry>,
    pub original_indices: Vec<usize>,
}

impl WindowedPeriods {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: PeriodEntry) {
        self.original_indices.push(entry.original_index);
        self.entries.push(entry);
    }
}

/// Period index -> observed value. A missing index means "not observed",
/// which is not the same thing as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseSeries(BTreeMap<usize, Decimal>);

impl SparseSeries {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, index: usize, value: Decimal) {
        self.0.insert(index, value);
    }

    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.0.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Decimal)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(usize, Decimal)> for SparseSeries {
    fn from_iter<I: IntoIterator<Item = (usize, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SparseSeries {
    type Item = (usize, Decimal);
    type IntoIter = btree_map::IntoIter<usize, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The shapes a performance series takes in upstream payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSeries {
    /// A single observation, placed at index 0.
    Scalar(Decimal),
    /// Values indexed by their array position.
    Flat(Vec<Value>),
    /// Already-paired `[index, value]` entries.
    Paired(Vec<Value>),
    /// Missing or unrecognised input.
    Empty,
}

impl RawSeries {
    /// Classifies a JSON value. The pair shape is recognised by the first element.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(_) => crate::utils::decimal_utils::decimal_from_json(value)
                .map(RawSeries::Scalar)
                .unwrap_or(RawSeries::Empty),
            Value::Array(items) => {
                let paired = matches!(items.first(), Some(Value::Array(first)) if first.len() == 2);
                if paired {
                    RawSeries::Paired(items.clone())
                } else {
                    RawSeries::Flat(items.clone())
                }
            }
            _ => RawSeries::Empty,
        }
    }
}

/// Per-scenario factor series keyed by original period index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioFactors {
    pub expected: SparseSeries,
    pub best: SparseSeries,
    pub worst: SparseSeries,
}

/// Projected series aligned with the reconciled real series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub expected: Vec<Option<Decimal>>,
    pub best: Vec<Option<Decimal>>,
    pub worst: Vec<Option<Decimal>>,
}

impl Projections {
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty() && self.best.is_empty() && self.worst.is_empty()
    }
}

/// Where the real series was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistorySource {
    /// `performance.period` / `performance.real`
    Performance,
    /// `portfolios: [{date, total_amount}]`
    PortfolioHistory,
    /// Nothing observable: a single point at the current value.
    CurrentValueOnly,
}

/// Window-filtered, scaled performance series ready for charts and tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeries {
    pub labels: Vec<String>,
    pub real: Vec<Option<Decimal>>,
    pub projections: Projections,
    pub scaling_factor: Decimal,
    pub anchor_position: usize,
    pub source: HistorySource,
}

impl PerformanceSeries {
    pub fn is_degenerate(&self) -> bool {
        self.source == HistorySource::CurrentValueOnly
    }
}

/// A reconciled value with its period-over-period return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPoint {
    pub value: Option<Decimal>,
    /// `None` means "no data": first row, null neighbour or zero previous value.
    pub return_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub label: String,
    pub value: Option<Decimal>,
    pub return_pct: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryTable {
    pub rows: Vec<HistoryRow>,
}
