//! Compare sampling strategies on a reference spectrum
//!
//! Runs a replicate batch with each sampling strategy against the same
//! reference base spectrum and reports the mean and spread of the total
//! counts alongside the wall clock time of each batch.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use spectrum_math::{mean, median, variance};
use spectrum_sim::reference_spectra::ReferenceShape;
use spectrum_sim::settings::{fresh_seed, SynthesisSettings};
use spectrum_sim::shared_args::SharedSynthesisArgs;
use spectrum_sim::{generate_replicates, SamplingStrategy, SpectrumSynthesizer};

/// Command line arguments for the strategy shootout
#[derive(Parser, Debug)]
#[command(
    name = "Strategy Shootout",
    about = "Compares spectrum sampling strategies on a reference base spectrum",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    shared: SharedSynthesisArgs,

    /// Number of replicate spectra per strategy
    #[arg(long, default_value_t = 100)]
    replicates: usize,

    /// Reference spectrum shape (flat or photopeak)
    #[arg(long, default_value = "flat")]
    shape: ReferenceShape,

    /// Only run this strategy (key or label); runs all when omitted
    #[arg(long)]
    strategy: Option<SamplingStrategy>,

    /// Settings file supplying the strategy and seed when not given on the command line
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run replicates serially instead of in parallel
    #[arg(long, default_value_t = false)]
    serial: bool,
}

/// Summary of one strategy's replicate batch
struct StrategyReport {
    strategy: SamplingStrategy,
    mean_total: f64,
    variance_total: f64,
    median_total: f64,
    seconds: f64,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();
    anyhow::ensure!(args.replicates > 0, "At least one replicate is required");

    let settings = match &args.settings {
        Some(path) => Some(
            SynthesisSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        ),
        None => None,
    };

    let strategies: Vec<SamplingStrategy> = match (args.strategy, &settings) {
        (Some(strategy), _) => vec![strategy],
        (None, Some(settings)) => vec![settings.sampling_strategy],
        (None, None) => SamplingStrategy::ALL.to_vec(),
    };

    let base_seed = args
        .shared
        .seed
        .or_else(|| settings.as_ref().map(|s| s.run_seed()))
        .unwrap_or_else(fresh_seed);

    let context = args.shared.context()?;
    let reference = args.shape.build(context.channel_count());
    let contribution = args.shared.contribution(reference)?;
    let expected = contribution.expected_yield(&context);

    println!("Reference shape: {}", args.shape);
    println!(
        "Acquisition: {:.1} s, {} channels, dose {}, sensitivity {}",
        args.shared.acquisition_time, args.shared.channels, args.shared.dose, args.shared.sensitivity
    );
    println!("Expected total counts: {expected:.1}");
    println!("Base seed: {base_seed}, replicates: {}", args.replicates);

    let progress_style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
        .progress_chars("█▉▊▋▌▍▎▏ ");
    let pb = ProgressBar::new(strategies.len() as u64);
    pb.set_style(progress_style);

    let mut reports = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        pb.set_message(strategy.label());

        let synthesizer = SpectrumSynthesizer::new(strategy);
        let start = Instant::now();
        let batch = generate_replicates(
            &synthesizer,
            &context,
            std::slice::from_ref(&contribution),
            Some(base_seed),
            args.replicates,
            !args.serial,
        )?;
        let seconds = start.elapsed().as_secs_f64();

        let totals = batch.totals();
        info!("{} finished in {:.3} s", strategy, seconds);

        reports.push(StrategyReport {
            strategy,
            mean_total: mean(&totals),
            variance_total: variance(&totals),
            median_total: median(&totals).map_err(anyhow::Error::msg)?,
            seconds,
        });
        pb.inc(1);
    }
    pb.finish_with_message("Shootout complete!");

    println!("\n===== Results Summary =====");
    println!(
        "{:<28} {:>12} {:>12} {:>12} {:>10}",
        "Strategy", "Mean", "Variance", "Median", "Time (s)"
    );
    for report in &reports {
        println!(
            "{:<28} {:>12.1} {:>12.1} {:>12.1} {:>10.3}",
            report.strategy.label(),
            report.mean_total,
            report.variance_total,
            report.median_total,
            report.seconds
        );
    }

    if reports.len() > 1 {
        let means: Vec<f64> = reports.iter().map(|r| r.mean_total).collect();
        let max = means.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = means.iter().cloned().fold(f64::INFINITY, f64::min);
        println!(
            "\nSpread of mean totals: {:.1} (sqrt of smallest mean: {:.1})",
            max - min,
            min.sqrt()
        );
    }

    Ok(())
}
