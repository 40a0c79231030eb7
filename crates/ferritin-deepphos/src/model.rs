//! DeepPhos is a densely connected convolutional network that scores phosphorylation sites
//! from one-hot windows of the surrounding sequence.
//!
//! Key features:
//! - one branch per window size (51, 33, 15 residues), each with its own kernel width
//! - a dense block per branch: every conv layer sees the concatenation of all earlier outputs
//! - branch outputs are flattened, concatenated and classified by two dense layers
//!
//! - [paper](https://doi.org/10.1093/bioinformatics/btz721)
//! - [GH PythonModel](https://github.com/USTCHIlab/DeepPhos)
//!
use crate::config::DeepPhosConfig;
use candle_core::{DType, Module, Result, Tensor, D};
use candle_nn::{conv1d_no_bias, linear, ops::softmax, Conv1d, Conv1dConfig, Linear, VarBuilder};

fn same_padding(kernel_size: usize) -> Conv1dConfig {
    Conv1dConfig {
        padding: kernel_size / 2,
        ..Default::default()
    }
}

/// `nb_layers` convolutions, each appending `growth_rate` channels to the running feature map.
#[derive(Debug)]
struct DenseBlock {
    layers: Vec<Conv1d>,
}

impl DenseBlock {
    fn load(vb: VarBuilder, cfg: &DeepPhosConfig, kernel_size: usize) -> Result<Self> {
        let mut layers = Vec::with_capacity(cfg.nb_layers);
        for i in 0..cfg.nb_layers {
            let in_channels = cfg.nb_filter + i * cfg.growth_rate;
            layers.push(conv1d_no_bias(
                in_channels,
                cfg.growth_rate,
                kernel_size,
                same_padding(kernel_size),
                vb.pp(i),
            )?);
        }
        Ok(Self { layers })
    }
}

impl Module for DenseBlock {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let mut xs = xs.clone();
        for conv in self.layers.iter() {
            let ys = conv.forward(&xs.relu()?)?.relu()?;
            xs = Tensor::cat(&[&xs, &ys], 1)?;
        }
        Ok(xs)
    }
}

/// One window size worth of the network.
#[derive(Debug)]
pub struct Branch {
    window_size: usize,
    conv_ori: Conv1d,
    block: DenseBlock,
}

impl Branch {
    pub fn load(
        vb: VarBuilder,
        cfg: &DeepPhosConfig,
        window_size: usize,
        kernel_size: usize,
    ) -> Result<Self> {
        let conv_ori = conv1d_no_bias(
            cfg.alphabet_size,
            cfg.nb_filter,
            1,
            Conv1dConfig::default(),
            vb.pp("conv_ori"),
        )?;
        let block = DenseBlock::load(vb.pp("block"), cfg, kernel_size)?;
        Ok(Self {
            window_size,
            conv_ori,
            block,
        })
    }
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Module for Branch {
    /// `(batch, window, alphabet)` -> `(batch, window * channels)`
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let (_batch, window, _alphabet) = xs.dims3()?;
        if window != self.window_size {
            candle_core::bail!(
                "branch expects windows of {} residues, got {window}",
                self.window_size
            );
        }
        // convolve along the sequence axis
        let xs = xs.transpose(1, 2)?.contiguous()?;
        let xs = self.conv_ori.forward(&xs)?.relu()?;
        let xs = self.block.forward(&xs)?.relu()?;
        // flatten position-major, matching the converted dense weights
        xs.transpose(1, 2)?.contiguous()?.flatten_from(1)
    }
}

/// The DeepPhos model
#[derive(Debug)]
pub struct DeepPhos {
    branches: Vec<Branch>,
    dense_1: Linear,
    dense_softmax: Linear,
}

impl DeepPhos {
    pub fn load(vb: VarBuilder, cfg: &DeepPhosConfig) -> Result<Self> {
        let mut branches = Vec::with_capacity(cfg.window_sizes.len());
        for (&window_size, &kernel_size) in cfg.window_sizes.iter().zip(cfg.kernel_sizes.iter()) {
            branches.push(Branch::load(
                vb.pp(format!("branch_{window_size}")),
                cfg,
                window_size,
                kernel_size,
            )?);
        }
        let dense_1 = linear(cfg.flattened_size(), cfg.dense_number, vb.pp("dense_1"))?;
        let dense_softmax = linear(cfg.dense_number, cfg.nb_classes, vb.pp("dense_softmax"))?;
        Ok(Self {
            branches,
            dense_1,
            dense_softmax,
        })
    }

    /// Class probabilities, `(batch, nb_classes)`.
    ///
    /// `inputs` holds one `(batch, window, alphabet)` tensor per branch, in window-size order.
    pub fn forward(&self, inputs: &[Tensor]) -> Result<Tensor> {
        if inputs.len() != self.branches.len() {
            candle_core::bail!(
                "expected {} window inputs, got {}",
                self.branches.len(),
                inputs.len()
            );
        }
        let flattened = self
            .branches
            .iter()
            .zip(inputs)
            .map(|(branch, xs)| branch.forward(xs))
            .collect::<Result<Vec<_>>>()?;
        let xs = Tensor::cat(&flattened, D::Minus1)?;
        let xs = self.dense_1.forward(&xs)?.relu()?;
        let logits = self.dense_softmax.forward(&xs)?;
        softmax(&logits, D::Minus1)
    }

    /// Probability of the phosphorylated class for each row of the batch.
    pub fn positive_scores(&self, inputs: &[Tensor]) -> Result<Vec<f32>> {
        let probs = self.forward(inputs)?;
        probs
            .narrow(D::Minus1, 1, 1)?
            .squeeze(D::Minus1)?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()
    }

    pub fn window_sizes(&self) -> Vec<usize> {
        self.branches.iter().map(Branch::window_size).collect()
    }
}
