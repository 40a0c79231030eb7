//! Prediction driver
//!
//! Reads a site table, encodes every kept site at each window size, scores the sites with the
//! model selected for the request and writes the positive-class probabilities.
use crate::config::PredictOptions;
use crate::device;
use crate::error::PredictError;
use crate::model::DeepPhos;
use crate::sites::PredictFrame;
use crate::weights::{output_path, resolve_weights};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use ferritin_featurizers::{FeatureError, SiteFeatures};
use ferritin_io::{read_site_table, write_predictions, Prediction};
use itertools::izip;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct PredictionRequest {
    /// Site table: protein id, position, site, sequence.
    pub table: PathBuf,
    pub frame: PredictFrame,
    /// Folder under the output root that receives the prediction file.
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub output: PathBuf,
    pub weights: PathBuf,
    pub rows_read: usize,
    pub rows_scored: usize,
}

pub struct Predictor {
    options: PredictOptions,
    device: Device,
}

impl Predictor {
    pub fn new(options: PredictOptions) -> Result<Self, PredictError> {
        let device = device(options.cpu)?;
        Self::with_device(options, device)
    }

    pub fn with_device(options: PredictOptions, device: Device) -> Result<Self, PredictError> {
        options.validate()?;
        Ok(Self { options, device })
    }

    pub fn options(&self) -> &PredictOptions {
        &self.options
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionReport, PredictError> {
        let weights = resolve_weights(&self.options.models_dir, &request.frame)?;
        let output = output_path(&self.options.output_root, &request.folder, &request.frame);
        info!(
            table = %request.table.display(),
            weights = %weights.display(),
            sites = %request.frame.sites(),
            "predicting phosphorylation sites"
        );

        let records = read_site_table(&request.table, self.options.has_header)?;
        let cfg = &self.options.model_config;
        let features =
            SiteFeatures::build(&records, request.frame.sites().residues(), &cfg.window_sizes)?;

        let scores = if features.is_empty() {
            warn!(
                rows = records.len(),
                "no rows match the requested site type; writing an empty prediction file"
            );
            Vec::new()
        } else {
            let model = self.load_model(&weights)?;
            self.score(&model, &features)?
        };

        let predictions: Vec<Prediction> =
            izip!(features.protein_ids, features.position_labels, scores)
                .map(|(protein_id, position, score)| Prediction {
                    protein_id,
                    position,
                    score,
                })
                .collect();
        write_predictions(&output, &predictions)?;
        info!(
            output = %output.display(),
            scored = predictions.len(),
            "wrote predictions"
        );

        Ok(PredictionReport {
            output,
            weights,
            rows_read: records.len(),
            rows_scored: predictions.len(),
        })
    }

    fn load_model(&self, weights: &Path) -> Result<DeepPhos, PredictError> {
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &self.device)? };
        Ok(DeepPhos::load(vb, &self.options.model_config)?)
    }

    fn score(&self, model: &DeepPhos, features: &SiteFeatures) -> Result<Vec<f32>, PredictError> {
        let inputs = features
            .matrices
            .iter()
            .map(|matrix| matrix.to_tensor(&self.device))
            .collect::<Result<Vec<Tensor>, FeatureError>>()?;
        let n_sites = features.n_sites();
        let batch_size = self.options.batch_size;

        let mut scores = Vec::with_capacity(n_sites);
        for start in (0..n_sites).step_by(batch_size) {
            let len = batch_size.min(n_sites - start);
            let batch = inputs
                .iter()
                .map(|xs| xs.narrow(0, start, len))
                .collect::<candle_core::Result<Vec<_>>>()?;
            scores.extend(model.positive_scores(&batch)?);
            debug!(start, len, "scored batch");
        }
        Ok(scores)
    }
}

/// Score the sites in `table` and write them under `<output_root>/<folder>/`.
pub fn predict_phosphorylation<P: AsRef<Path>>(
    table: P,
    frame: PredictFrame,
    folder: &str,
    options: PredictOptions,
) -> Result<PredictionReport, PredictError> {
    let predictor = Predictor::new(options)?;
    predictor.predict(&PredictionRequest {
        table: table.as_ref().to_path_buf(),
        frame,
        folder: folder.to_string(),
    })
}
