use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pchem::{Ehrenfest, EhrenfestParams, Frame};

#[derive(Debug, Parser)]
#[command(name = "ehrenfest")]
#[command(about = "Run the Ehrenfest urn model and print its trajectory")]
struct Cli {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    n_a: Option<usize>,

    #[arg(long)]
    n_b: Option<usize>,

    #[arg(long)]
    steps: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print every k-th frame
    #[arg(long, default_value_t = 10)]
    every: usize,

    /// Print the final summary as JSON
    #[arg(long, default_value_t = false)]
    summary_json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = try_main() {
        eprintln!("ehrenfest run failed: {error:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    if cli.every == 0 {
        bail!("--every must be greater than zero");
    }

    let params = resolve_params(&cli)?;
    params.validate()?;
    info!(?params, "starting run");

    let sim = Ehrenfest::from_params(&params)?;

    if !cli.summary_json {
        println!("{:>8} {:>6} {:>6} {:>8} {:>8} {:>6}", "step", "N_A", "N_B", "f_A", "f_B", "dN");
    }

    let mut last: Option<Frame> = None;
    for frame in sim {
        if !cli.summary_json && (frame.step % cli.every == 0 || frame.step == params.n_steps) {
            print_row(&frame);
        }
        last = Some(frame);
    }

    let last = last.context("simulation produced no frames")?;
    let summary = last.summary();
    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!("Steps:              {}", summary.steps);
        println!("Final fraction A:   {:.4}", summary.fraction_a);
        println!("Final fraction B:   {:.4}", summary.fraction_b);
        println!("Fluctuation mean:   {:.4}", summary.fluctuation_mean);
        println!("Fluctuation stddev: {:.4}", summary.fluctuation_std);
    }

    Ok(())
}

fn resolve_params(cli: &Cli) -> Result<EhrenfestParams> {
    let mut params = match &cli.config {
        Some(path) => EhrenfestParams::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EhrenfestParams::default(),
    };

    if let Some(n_a) = cli.n_a {
        params.n_a = n_a;
    }
    if let Some(n_b) = cli.n_b {
        params.n_b = n_b;
    }
    if let Some(steps) = cli.steps {
        params.n_steps = steps;
    }
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }

    Ok(params)
}

fn print_row(frame: &Frame) {
    let f_a = frame.fraction_a.last().copied().unwrap_or(0.0);
    let f_b = frame.fraction_b.last().copied().unwrap_or(0.0);
    let d = frame.fluctuations.last().copied().unwrap_or(0);
    println!(
        "{:>8} {:>6} {:>6} {:>8.4} {:>8.4} {:>6}",
        frame.step, frame.count_a, frame.count_b, f_a, f_b, d
    );
}
