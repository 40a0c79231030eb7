//! One-hot Encoding
//!
//! Each window becomes a `(window_size, 21)` block of zeros and ones; stacking the windows of
//! every kept site gives a `(n_sites, window_size, 21)` matrix per window size.
//!
use crate::alphabet::{residue_index, ALPHABET_SIZE};
use crate::error::FeatureError;
use crate::window::centered_window;
use candle_core::{Device, Tensor};
use ferritin_io::SiteRecord;
use ndarray::Array3;

/// One-hot encode `windows`, each expected to hold `window_size` residues.
///
/// Residues outside the alphabet leave their row empty.
pub fn one_hot(windows: &[String], window_size: usize) -> Array3<f32> {
    let mut matrix = Array3::<f32>::zeros((windows.len(), window_size, ALPHABET_SIZE));
    for (site, window) in windows.iter().enumerate() {
        for (pos, residue) in window.chars().take(window_size).enumerate() {
            if let Some(idx) = residue_index(residue) {
                matrix[[site, pos, idx]] = 1.0;
            }
        }
    }
    matrix
}

#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    window_size: usize,
    values: Array3<f32>,
}

impl FeatureMatrix {
    pub fn from_windows(windows: &[String], window_size: usize) -> Self {
        Self {
            window_size,
            values: one_hot(windows, window_size),
        }
    }
    pub fn window_size(&self) -> usize {
        self.window_size
    }
    pub fn n_sites(&self) -> usize {
        self.values.dim().0
    }
    pub fn values(&self) -> &Array3<f32> {
        &self.values
    }
    /// `(n_sites, window_size, 21)` tensor on `device`.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor, FeatureError> {
        let tensor =
            Tensor::from_iter(self.values.iter().copied(), device)?.reshape(self.values.dim())?;
        Ok(tensor)
    }
}

/// The sites kept for scoring, with one feature matrix per window size.
#[derive(Debug, Clone)]
pub struct SiteFeatures {
    pub protein_ids: Vec<String>,
    pub positions: Vec<usize>,
    /// Positions as written in the site table.
    pub position_labels: Vec<String>,
    pub matrices: Vec<FeatureMatrix>,
}

impl SiteFeatures {
    /// Keep the records whose residue at `position` is one of `residues` and encode them at
    /// each of `window_sizes`.
    pub fn build(
        records: &[SiteRecord],
        residues: &[char],
        window_sizes: &[usize],
    ) -> Result<Self, FeatureError> {
        if let Some(&size) = window_sizes.iter().find(|&&size| size % 2 == 0) {
            return Err(FeatureError::EvenWindow(size));
        }

        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            let residue = record
                .residue()
                .ok_or_else(|| FeatureError::SiteOutOfRange {
                    protein_id: record.protein_id.clone(),
                    position: record.position,
                    length: record.sequence.chars().count(),
                })?
                .to_ascii_uppercase();

            if !record.site.is_empty() && !record.site.eq_ignore_ascii_case(&residue.to_string())
            {
                tracing::warn!(
                    protein = %record.protein_id,
                    position = record.position,
                    site = %record.site,
                    %residue,
                    "site column disagrees with the sequence residue; scoring the sequence residue"
                );
            }
            if residues.contains(&residue) {
                kept.push(record);
            } else {
                tracing::debug!(
                    protein = %record.protein_id,
                    position = record.position,
                    %residue,
                    "skipping site outside the requested residues"
                );
            }
        }
        if kept.len() < records.len() {
            tracing::info!(
                kept = kept.len(),
                skipped = records.len() - kept.len(),
                "filtered sites by residue"
            );
        }

        let matrices = window_sizes
            .iter()
            .map(|&size| -> Result<FeatureMatrix, FeatureError> {
                let windows = kept
                    .iter()
                    .map(|record| centered_window(&record.sequence, record.position, size))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FeatureMatrix::from_windows(&windows, size))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            protein_ids: kept.iter().map(|r| r.protein_id.clone()).collect(),
            positions: kept.iter().map(|r| r.position).collect(),
            position_labels: kept.iter().map(|r| r.position_label.clone()).collect(),
            matrices,
        })
    }

    pub fn n_sites(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
