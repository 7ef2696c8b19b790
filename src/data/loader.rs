use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use super::model::{Descriptors, IqmRecord, IqmTable, Source, ID_COLUMN, SOURCE_COLUMN};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Descriptor table
// ---------------------------------------------------------------------------

/// Load the variable-description table.
///
/// Layout: header row, first column = variable name, second column =
/// free-text description. Extra columns are ignored; fewer than two columns
/// is rejected as malformed.
pub fn load_descriptors(path: &Path) -> Result<Descriptors> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    if headers.len() < 2 {
        return Err(Error::DescriptorShape {
            path: path.to_path_buf(),
        });
    }

    let mut entries = BTreeMap::new();
    for result in reader.records() {
        let record = result.map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let description = record.get(1).unwrap_or("").trim();
        entries.insert(name.to_string(), description.to_string());
    }

    debug!(
        "loaded {} variable descriptions from {}",
        entries.len(),
        path.display()
    );
    Ok(Descriptors::new(entries))
}

// ---------------------------------------------------------------------------
// Observation table
// ---------------------------------------------------------------------------

/// Load the combined USER/API observation table from a CSV file.
///
/// Layout: header row with a `bids_name` column, a `SOURCE` column holding
/// `USER` or `API`, and one numeric column per metric. Empty metric cells
/// are treated as missing; anything else that does not parse as a number is
/// a fatal load error.
pub fn load_iqm_csv(path: &Path) -> Result<IqmTable> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let id_idx = headers
        .iter()
        .position(|h| h == ID_COLUMN)
        .ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: ID_COLUMN.to_string(),
        })?;
    let source_idx = headers
        .iter()
        .position(|h| h == SOURCE_COLUMN)
        .ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: SOURCE_COLUMN.to_string(),
        })?;

    // Header order, not sorted order: the melt walks these columns as the
    // file declared them.
    let metric_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_idx && *i != source_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let bids_name = record.get(id_idx).unwrap_or("").to_string();
        let label = record.get(source_idx).unwrap_or("");
        let source = Source::parse(label).ok_or_else(|| Error::InvalidSource {
            path: path.to_path_buf(),
            row: row_no,
            value: label.to_string(),
        })?;

        let mut metrics = BTreeMap::new();
        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == id_idx || col_idx == source_idx {
                continue;
            }
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| Error::InvalidValue {
                path: path.to_path_buf(),
                row: row_no,
                column: headers[col_idx].clone(),
                value: cell.to_string(),
            })?;
            metrics.insert(headers[col_idx].clone(), value);
        }

        records.push(IqmRecord {
            bids_name,
            source,
            metrics,
        });
    }

    debug!(
        "loaded {} scans × {} metric columns from {}",
        records.len(),
        metric_columns.len(),
        path.display()
    );
    Ok(IqmTable {
        records,
        metric_columns,
    })
}
