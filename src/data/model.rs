use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name of the identifier column in the wide observation table.
pub const ID_COLUMN: &str = "bids_name";

/// Name of the cohort-label column in the wide observation table.
pub const SOURCE_COLUMN: &str = "SOURCE";

// ---------------------------------------------------------------------------
// Source – which cohort a scan came from
// ---------------------------------------------------------------------------

/// The data-source cohort of a scan: locally computed metrics (`USER`) or
/// metrics pulled from the web API (`API`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    User,
    Api,
}

impl Source {
    /// Parse the cohort label as it appears in the `SOURCE` column.
    /// Labels are matched exactly; anything else is rejected upstream.
    pub fn parse(label: &str) -> Option<Source> {
        match label {
            "USER" => Some(Source::User),
            "API" => Some(Source::Api),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Source::User => "USER",
            Source::Api => "API",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IqmRecord – one row of the wide observation table
// ---------------------------------------------------------------------------

/// A single scan (one row of the wide table).
#[derive(Debug, Clone)]
pub struct IqmRecord {
    /// BIDS-style scan identifier.
    pub bids_name: String,
    /// Which cohort the row belongs to.
    pub source: Source,
    /// Metric column → value. Only cells holding a number are present;
    /// empty cells are simply absent from the map.
    pub metrics: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// IqmTable – the complete wide observation table
// ---------------------------------------------------------------------------

/// The wide observation table: one row per scan, one column per metric.
#[derive(Debug, Clone, Default)]
pub struct IqmTable {
    /// All scans (rows).
    pub records: Vec<IqmRecord>,
    /// Ordered list of metric column names (excludes the identifier and
    /// cohort-label columns). Every record is melted against this full
    /// list, whether or not it holds a value for each column.
    pub metric_columns: Vec<String>,
}

impl IqmTable {
    /// Build a table from in-memory records, deriving the column list as
    /// the sorted union of the metric names the records carry.
    pub fn from_records(records: Vec<IqmRecord>) -> Self {
        let mut columns: BTreeSet<String> = BTreeSet::new();
        for rec in &records {
            for col in rec.metrics.keys() {
                columns.insert(col.clone());
            }
        }
        IqmTable {
            records,
            metric_columns: columns.into_iter().collect(),
        }
    }

    /// Number of scans.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no scans.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Descriptors – human-readable variable descriptions
// ---------------------------------------------------------------------------

/// The auxiliary table of variable descriptions. Loaded eagerly on every
/// render call; reserved for figure annotation and not consumed in the
/// figure output itself.
#[derive(Debug, Clone, Default)]
pub struct Descriptors {
    entries: BTreeMap<String, String>,
}

impl Descriptors {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Descriptors { entries }
    }

    /// Free-text description of a variable, if the table has one.
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels_round_trip() {
        assert_eq!(Source::parse("USER"), Some(Source::User));
        assert_eq!(Source::parse("API"), Some(Source::Api));
        assert_eq!(Source::User.as_str(), "USER");
        assert_eq!(Source::Api.as_str(), "API");
    }

    #[test]
    fn source_labels_are_exact() {
        assert_eq!(Source::parse("user"), None);
        assert_eq!(Source::parse("Api"), None);
        assert_eq!(Source::parse(""), None);
    }

    #[test]
    fn from_records_derives_sorted_column_union() {
        let a = IqmRecord {
            bids_name: "sub-01".into(),
            source: Source::User,
            metrics: BTreeMap::from([("tsnr".to_string(), 40.0)]),
        };
        let b = IqmRecord {
            bids_name: "sub-02".into(),
            source: Source::Api,
            metrics: BTreeMap::from([("snr".to_string(), 3.1)]),
        };
        let table = IqmTable::from_records(vec![a, b]);
        assert_eq!(table.metric_columns, vec!["snr", "tsnr"]);
        assert_eq!(table.len(), 2);
    }
}
