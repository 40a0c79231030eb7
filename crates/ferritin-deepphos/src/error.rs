use ferritin_featurizers::FeatureError;
use ferritin_io::TableError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("unknown site type `{0}`, expected `ST` or `Y`")]
    UnknownSiteType(String),
    #[error("kinase prediction needs both a hierarchy and a kinase name")]
    MissingKinase,
    #[error("invalid kinase name `{0}`")]
    InvalidKinase(String),
    #[error("model weights not found at {}", .0.display())]
    MissingWeights(PathBuf),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error(transparent)]
    Candle(#[from] candle_core::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
