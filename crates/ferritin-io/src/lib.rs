//! ferritin-io
//!
//! Tabular inputs and outputs for site-level predictions.
//!
//! - [`read_site_table`]: `protein, position, site, sequence` rows from a CSV file.
//! - [`write_predictions`]: headerless, tab-separated, fully quoted `id, position, score` rows.
//!
mod error;
mod predictions;
mod sites;

pub use error::TableError;
pub use predictions::{write_predictions, Prediction};
pub use sites::{read_site_table, SiteRecord};
