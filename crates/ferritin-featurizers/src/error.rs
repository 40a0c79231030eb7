use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("window size must be odd, got {0}")]
    EvenWindow(usize),
    #[error("position {position} is outside a sequence of length {length}")]
    PositionOutOfRange { position: usize, length: usize },
    #[error("{protein_id}: position {position} is outside a sequence of length {length}")]
    SiteOutOfRange {
        protein_id: String,
        position: usize,
        length: usize,
    },
    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}
