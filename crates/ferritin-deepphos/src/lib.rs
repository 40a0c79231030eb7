//! ferritin-deepphos
//!
//! Phosphorylation site prediction with the [DeepPhos](https://github.com/USTCHIlab/DeepPhos)
//! models, ported to candle.
//!
//! ```shell
//! cargo run --bin ferritin-deepphos -- predict -i sites.csv -s ST -f run1
//! cargo run --bin ferritin-deepphos --features metal -- predict -i sites.csv -s Y -f run1
//! ```
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::{Device, Result};

pub mod config;
pub mod error;
pub mod model;
pub mod predictor;
pub mod sites;
pub mod weights;

pub use config::{DeepPhosConfig, PredictOptions};
pub use error::PredictError;
pub use model::DeepPhos;
pub use predictor::{predict_phosphorylation, PredictionReport, PredictionRequest, Predictor};
pub use sites::{FrameKind, Hierarchy, PredictFrame, SiteType};

pub fn device(cpu: bool) -> Result<Device> {
    if cpu {
        Ok(Device::Cpu)
    } else if cuda_is_available() {
        Ok(Device::new_cuda(0)?)
    } else if metal_is_available() {
        Ok(Device::new_metal(0)?)
    } else {
        #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
        {
            tracing::info!(
                "Running on CPU, to run on GPU(metal), build this example with `--features metal`"
            );
        }
        #[cfg(not(all(target_os = "macos", target_arch = "aarch64")))]
        {
            tracing::info!(
                "Running on CPU, to run on GPU, build this example with `--features cuda`"
            );
        }
        Ok(Device::Cpu)
    }
}
