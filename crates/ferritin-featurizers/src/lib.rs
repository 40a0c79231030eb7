//! ferritin-featurizers
//!
//! - utilities to convert candidate sites in protein sequences to ML-ready tensors.
//! - sites are cut into fixed-size windows centered on the residue and one-hot encoded.
//!
pub mod alphabet;
pub mod encoding;
mod error;
pub mod window;

pub use alphabet::{residue_index, ALPHABET, ALPHABET_SIZE, PAD};
pub use encoding::{one_hot, FeatureMatrix, SiteFeatures};
pub use error::FeatureError;
pub use window::centered_window;
