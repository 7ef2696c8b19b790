use super::model::{IqmTable, Source};

// ---------------------------------------------------------------------------
// Long-format table (one row per scan × metric)
// ---------------------------------------------------------------------------

/// One row of the long-format table.
#[derive(Debug, Clone)]
pub struct LongRow {
    pub bids_name: String,
    pub source: Source,
    /// Metric column the value came from.
    pub var: String,
    /// `None` when the scan had no value for this column.
    pub value: Option<f64>,
}

/// The unpivoted observation table. Read-only after construction; the
/// per-metric render loop reuses it across iterations.
#[derive(Debug, Clone, Default)]
pub struct LongTable {
    rows: Vec<LongRow>,
}

impl LongTable {
    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The present, finite values for one metric/cohort selection, in row
    /// order. A metric that never appears simply yields an empty vector.
    pub fn values(&self, var: &str, source: Source) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| row.var == var && row.source == source)
            .filter_map(|row| row.value)
            .filter(|v| v.is_finite())
            .collect()
    }
}

/// Unpivot the wide table into long form, keyed by (`bids_name`, `SOURCE`).
///
/// Every metric column is melted, not just the ones the caller asked to
/// plot. Invariant: the long table holds exactly
/// `records × metric_columns` rows; a cell missing from a record still
/// produces a row, with `value = None`.
pub fn melt(table: &IqmTable) -> LongTable {
    let mut rows = Vec::with_capacity(table.records.len() * table.metric_columns.len());
    for rec in &table.records {
        for col in &table.metric_columns {
            rows.push(LongRow {
                bids_name: rec.bids_name.clone(),
                source: rec.source,
                var: col.clone(),
                value: rec.metrics.get(col).copied(),
            });
        }
    }
    LongTable { rows }
}
