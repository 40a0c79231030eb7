use clap::Args;
use ferritin_deepphos::weights::{DEFAULT_MODELS_DIR, DEFAULT_OUTPUT_ROOT};
use ferritin_deepphos::{
    DeepPhosConfig, FrameKind, Hierarchy, PredictFrame, PredictOptions, PredictionRequest,
    Predictor,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Site table (CSV): protein id, position, site, sequence
    #[arg(short, long)]
    input: PathBuf,

    /// Site type to score: ST or Y
    #[arg(short, long)]
    sites: String,

    /// Output folder under the output root
    #[arg(short, long)]
    folder: String,

    #[arg(long, value_enum, default_value_t = FrameKind::General)]
    frame: FrameKind,

    /// Kinase hierarchy level; kinase frame only
    #[arg(long, value_enum)]
    hierarchy: Option<Hierarchy>,

    /// Kinase name; kinase frame only
    #[arg(long)]
    kinase: Option<String>,

    #[arg(long, default_value = DEFAULT_MODELS_DIR)]
    models_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,

    #[arg(long, default_value_t = 512)]
    batch_size: usize,

    /// The site table starts with a header line
    #[arg(long)]
    has_header: bool,

    /// Run on the CPU even when a GPU is available
    #[arg(long)]
    cpu: bool,

    /// JSON file overriding the model hyperparameters
    #[arg(long)]
    model_config: Option<PathBuf>,
}

pub fn execute(args: PredictArgs) -> anyhow::Result<()> {
    let frame = PredictFrame::from_parts(
        args.frame,
        &args.sites,
        args.hierarchy,
        args.kinase.as_deref(),
    )?;
    let model_config = match &args.model_config {
        Some(path) => DeepPhosConfig::from_file(path)?,
        None => DeepPhosConfig::default(),
    };
    let options = PredictOptions {
        models_dir: args.models_dir,
        output_root: args.output_root,
        batch_size: args.batch_size,
        has_header: args.has_header,
        cpu: args.cpu,
        model_config,
    };

    let predictor = Predictor::new(options)?;
    let report = predictor.predict(&PredictionRequest {
        table: args.input,
        frame,
        folder: args.folder,
    })?;

    println!("{}", report.output.display());
    Ok(())
}
