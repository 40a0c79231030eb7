//! Model and output file naming.
//!
//! | frame   | weights                                  | output file                                                 |
//! |---------|------------------------------------------|-------------------------------------------------------------|
//! | general | `model_general_S,T` / `model_general_Y`  | `general_ST_prediction_phosphorylation.txt`                 |
//! | kinase  | `model_<hierarchy>_<kinase>`             | `kinase_<hierarchy>_<kinase>prediction_phosphorylation.txt` |
//!
//! Weights are safetensors files converted from the published Keras models.
use crate::error::PredictError;
use crate::sites::PredictFrame;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODELS_DIR: &str = "./deepphos/models";
pub const DEFAULT_OUTPUT_ROOT: &str = "./data/processed";
pub const WEIGHTS_EXTENSION: &str = "safetensors";
pub const OUTPUT_SUFFIX: &str = "prediction_phosphorylation.txt";

pub fn weights_stem(frame: &PredictFrame) -> String {
    match frame {
        PredictFrame::General { sites } => format!("model_general_{}", sites.weights_label()),
        PredictFrame::Kinase {
            hierarchy, kinase, ..
        } => format!("model_{hierarchy}_{kinase}"),
    }
}

pub fn weights_path<P: AsRef<Path>>(models_dir: P, frame: &PredictFrame) -> PathBuf {
    models_dir
        .as_ref()
        .join(format!("{}.{WEIGHTS_EXTENSION}", weights_stem(frame)))
}

/// Weights path for `frame`, which must exist.
pub fn resolve_weights<P: AsRef<Path>>(
    models_dir: P,
    frame: &PredictFrame,
) -> Result<PathBuf, PredictError> {
    let path = weights_path(models_dir, frame);
    if path.is_file() {
        Ok(path)
    } else {
        Err(PredictError::MissingWeights(path))
    }
}

pub fn output_prefix(frame: &PredictFrame) -> String {
    match frame {
        PredictFrame::General { sites } => format!("general_{sites}_"),
        // no separator before the suffix for kinase models
        PredictFrame::Kinase {
            hierarchy, kinase, ..
        } => format!("kinase_{hierarchy}_{kinase}"),
    }
}

pub fn output_path<P: AsRef<Path>>(output_root: P, folder: &str, frame: &PredictFrame) -> PathBuf {
    output_root
        .as_ref()
        .join(folder)
        .join(format!("{}{OUTPUT_SUFFIX}", output_prefix(frame)))
}
