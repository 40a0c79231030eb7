use crate::error::PredictError;
use crate::weights::{DEFAULT_MODELS_DIR, DEFAULT_OUTPUT_ROOT};
use ferritin_featurizers::ALPHABET_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// DeepPhos network hyperparameters.
///
/// The defaults describe the published models. A JSON file only needs the fields that differ:
///
/// ```json
/// { "window_sizes": [33, 15], "kernel_sizes": [7, 3] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepPhosConfig {
    /// Residues per window, one branch each.
    pub window_sizes: Vec<usize>,
    /// Convolution width inside each branch's dense block.
    pub kernel_sizes: Vec<usize>,
    pub nb_filter: usize,
    pub growth_rate: usize,
    pub nb_layers: usize,
    pub dense_number: usize,
    pub nb_classes: usize,
    pub alphabet_size: usize,
}

impl Default for DeepPhosConfig {
    fn default() -> Self {
        Self {
            window_sizes: vec![51, 33, 15],
            kernel_sizes: vec![13, 7, 3],
            nb_filter: 32,
            growth_rate: 32,
            nb_layers: 5,
            dense_number: 32,
            nb_classes: 2,
            alphabet_size: ALPHABET_SIZE,
        }
    }
}

impl DeepPhosConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PredictError> {
        let config_str = std::fs::read_to_string(path)?;
        let config: DeepPhosConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PredictError> {
        if self.window_sizes.is_empty() {
            return Err(PredictError::Config("at least one window size is required".into()));
        }
        if self.window_sizes.len() != self.kernel_sizes.len() {
            return Err(PredictError::Config(format!(
                "{} window sizes but {} kernel sizes",
                self.window_sizes.len(),
                self.kernel_sizes.len()
            )));
        }
        if let Some(size) = self.window_sizes.iter().find(|&&w| w % 2 == 0) {
            return Err(PredictError::Config(format!("window size {size} is not odd")));
        }
        if let Some(size) = self.kernel_sizes.iter().find(|&&k| k % 2 == 0) {
            return Err(PredictError::Config(format!("kernel size {size} is not odd")));
        }
        if self.alphabet_size != ALPHABET_SIZE {
            return Err(PredictError::Config(format!(
                "alphabet size {} does not match the {ALPHABET_SIZE}-letter encoding",
                self.alphabet_size
            )));
        }
        if self.nb_classes < 2 {
            return Err(PredictError::Config("at least two classes are required".into()));
        }
        Ok(())
    }

    /// Channels leaving a branch's dense block.
    pub fn block_channels(&self) -> usize {
        self.nb_filter + self.nb_layers * self.growth_rate
    }

    /// Width of the concatenated branch outputs.
    pub fn flattened_size(&self) -> usize {
        self.window_sizes.iter().sum::<usize>() * self.block_channels()
    }
}

/// Runtime options for [`crate::Predictor`].
#[derive(Debug, Clone)]
pub struct PredictOptions {
    pub models_dir: PathBuf,
    pub output_root: PathBuf,
    pub batch_size: usize,
    pub has_header: bool,
    pub cpu: bool,
    pub model_config: DeepPhosConfig,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            batch_size: 512,
            has_header: false,
            cpu: false,
            model_config: DeepPhosConfig::default(),
        }
    }
}

impl PredictOptions {
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.batch_size == 0 {
            return Err(PredictError::Config("batch size must be positive".into()));
        }
        self.model_config.validate()
    }
}
