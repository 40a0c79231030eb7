use crate::error::TableError;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Positive-class probability for one site.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub protein_id: String,
    /// Position text as read from the site table.
    pub position: String,
    pub score: f32,
}

/// Write predictions as `id<TAB>position<TAB>score` with every field quoted and no header.
///
/// Missing parent directories are created.
pub fn write_predictions<P: AsRef<Path>>(
    path: P,
    predictions: &[Prediction],
) -> Result<(), TableError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut df = df!(
        "id" => predictions.iter().map(|p| p.protein_id.as_str()).collect::<Vec<_>>(),
        "position" => predictions.iter().map(|p| p.position.as_str()).collect::<Vec<_>>(),
        "score" => predictions.iter().map(|p| p.score).collect::<Vec<_>>(),
    )?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .with_separator(b'\t')
        .with_quote_style(QuoteStyle::Always)
        .finish(&mut df)?;
    Ok(())
}
