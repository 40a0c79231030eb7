//! Site Tables
//!
//! Candidate phosphorylation sites, one per row:
//!
//! ```text
//! P04637,15,S,MEEPQSDPSVEPPLSQETFSDLWKLL...
//! ```
//!
//! Columns are read by position: protein id, 1-based residue position, site residue and the
//! protein sequence the position indexes into.
use crate::error::TableError;
use itertools::izip;
use polars::prelude::*;
use std::fs;
use std::path::Path;

const SITE_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub protein_id: String,
    /// 1-based index of the candidate residue within `sequence`.
    pub position: usize,
    /// `position` as written in the table, trimmed. Written back unchanged.
    pub position_label: String,
    pub site: String,
    pub sequence: String,
}

impl SiteRecord {
    /// Residue found in the sequence at `position`, if the position is in range.
    pub fn residue(&self) -> Option<char> {
        self.position
            .checked_sub(1)
            .and_then(|idx| self.sequence.chars().nth(idx))
    }
}

/// Read a site table. All columns are read as text and validated here.
///
/// An empty file holds no rows, with or without `has_header`.
pub fn read_site_table<P: AsRef<Path>>(
    path: P,
    has_header: bool,
) -> Result<Vec<SiteRecord>, TableError> {
    let path = path.as_ref();
    if fs::metadata(path)?.len() == 0 {
        return Ok(Vec::new());
    }
    let reader = CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?;
    let df = match reader.finish() {
        Ok(df) => df,
        Err(PolarsError::NoData(_)) => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    site_records(&df, has_header)
}

fn site_records(df: &DataFrame, has_header: bool) -> Result<Vec<SiteRecord>, TableError> {
    if df.width() < SITE_COLUMNS {
        return Err(TableError::MissingColumn {
            expected: SITE_COLUMNS,
            found: df.width(),
        });
    }
    let ids = text_column(df, 0)?;
    let positions = text_column(df, 1)?;
    let sites = text_column(df, 2)?;
    let sequences = text_column(df, 3)?;

    // line numbers as they appear in the file
    let offset = if has_header { 2 } else { 1 };

    izip!(ids, positions, sites, sequences)
        .enumerate()
        .map(|(idx, (id, position, site, sequence))| {
            let row = idx + offset;
            let missing = |name: &str| TableError::MalformedRow {
                row,
                reason: format!("missing {name}"),
            };
            let protein_id = id.ok_or_else(|| missing("protein id"))?;
            let position = position.ok_or_else(|| missing("position"))?;
            let site = site.ok_or_else(|| missing("site"))?;
            let sequence = sequence.ok_or_else(|| missing("sequence"))?;
            let position_label = position.trim().to_string();
            Ok(SiteRecord {
                protein_id: protein_id.trim().to_string(),
                position: parse_position(&position_label, row)?,
                position_label,
                site: site.trim().to_string(),
                sequence: sequence.trim().to_string(),
            })
        })
        .collect()
}

fn text_column(df: &DataFrame, index: usize) -> Result<Vec<Option<String>>, TableError> {
    let series = df.get_columns()[index].as_materialized_series();
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

fn parse_position(value: &str, row: usize) -> Result<usize, TableError> {
    match value.parse::<usize>() {
        Ok(0) => Err(TableError::MalformedRow {
            row,
            reason: "positions are 1-based, found 0".to_string(),
        }),
        Ok(position) => Ok(position),
        Err(_) => Err(TableError::MalformedRow {
            row,
            reason: format!("position `{value}` is not an integer"),
        }),
    }
}
