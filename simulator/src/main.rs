use anyhow::Context;
use clap::Parser;
use radoncore::{PathModel, RegularizationModel};
use std::fs;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic Radon transform workflow driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 256)]
    samples: usize,
    /// Regularization model: L2, L1 or Cauchy
    #[arg(long, default_value = "L2")]
    model: RegularizationModel,
    /// Path model: linear or parabolic
    #[arg(long)]
    path: Option<PathModel>,
    /// Hyperparameters, trade-off first then the IRLS scale constant
    #[arg(long, value_delimiter = ',', default_value = "0.01")]
    hyperparameters: Vec<f64>,
    /// Uniform noise level relative to the peak amplitude
    #[arg(long)]
    noise: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Scale every trace to unit peak amplitude before inversion
    #[arg(long)]
    normalize: bool,
    /// Partially stack the gather onto this many uniform distance edges
    #[arg(long)]
    stack_bins: Option<usize>,
    /// Write the workflow result as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.samples, args.model, args.hyperparameters)
    };
    if let Some(path) = args.path {
        workflow_config.path = path;
    }
    if let Some(noise) = args.noise {
        workflow_config.noise = noise;
    }
    if let Some(seed) = args.seed {
        workflow_config.seed = seed;
    }
    if args.normalize {
        workflow_config.normalize = true;
    }
    if args.stack_bins.is_some() {
        workflow_config.stack_bins = args.stack_bins;
    }

    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute()?;

    println!(
        "{} inversion -> radon {:?} from {} traces, data rms {:.4}, misfit rms {:.4}",
        workflow_config.regularization,
        result.radon_shape,
        result.traces_inverted,
        result.data_rms,
        result.misfit_rms
    );
    println!(
        "bins solved {}, IRLS iterations {}, bins at iteration cap {}",
        result.metrics.bins_solved, result.metrics.irls_iterations, result.metrics.unconverged_bins
    );
    for recovery in &result.recoveries {
        println!(
            "pick p={:+.4} t={:.3} -> expected row {}, recovered row {}{}",
            recovery.slowness,
            recovery.time,
            recovery.expected_index,
            recovery.recovered_index,
            if recovery.is_exact() { "" } else { " (off)" }
        );
    }

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let report = serde_json::to_string_pretty(&result).context("serializing workflow report")?;
        fs::write(&report_path, report)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}
