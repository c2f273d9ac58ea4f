#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix everything, and more to force us to add inline allows, which are even more needlessly verbose, but give us a mechanism to say "we think this is okay, but you might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]
//! Command line interface for `pn-gen`.
//!
//! Loads a Petri net (JSON, YAML or `MessagePack`), plays it out with the given options, and writes
//! the resulting event log (or the raw walks) as JSON. See binary --help for more information.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use pn_core::TokenGame;
use pn_gen::utils::{
    create_timestamped_output_dir,
    load_config,
    load_net,
    write_dot_file,
    write_json,
};
use pn_gen::{
    play_out,
    PlayoutConfig,
    PlayoutOutput,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// pn-gen command-line interface to generate synthetic event logs by random playout of a Petri net
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the net definition (JSON, YAML or `MessagePack`).
    #[arg(short, long)]
    net: PathBuf,

    /// Optional YAML/JSON playout configuration; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of traces to generate.
    #[arg(short = 't', long)]
    num_traces: Option<usize>,

    /// Maximum number of visible events per trace.
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u64).range(1..))]
    max_trace_length: Option<u64>,

    /// Maximum number of fired transitions (visible or silent) per trace.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_total_steps: Option<u64>,

    /// Relative jitter applied to activity durations (range 0.0–1.0, exclusive).
    #[arg(short, long, value_parser = parse_jitter)]
    jitter: Option<f64>,

    /// Seed for the random source; omit for a fresh seed on every run.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the raw walks (markings and fired transitions) instead of an event log.
    #[arg(long)]
    raw_walks: bool,

    /// Output file; defaults to a timestamped directory under `runs/`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`).
    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

/// Custom parser for `jitter` to enforce range [0.0, 1.0)
fn parse_jitter(s: &str) -> Result<f64, String> {
    let val: f64 = s.parse().map_err(|_| format!("'{s}' isn't a valid float number"))?;
    if (0.0..1.0).contains(&val) {
        Ok(val)
    } else {
        Err(format!("value must be in [0.0, 1.0), got: {val}"))
    }
}

/// Build the playout configuration from the optional config file and the command-line overrides.
fn playout_config(args: &Cli) -> Result<PlayoutConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PlayoutConfig::default(),
    };

    if let Some(n) = args.num_traces {
        config.no_traces = n;
    }
    if let Some(len) = args.max_trace_length {
        config.max_trace_length = usize::try_from(len)?;
    }
    if let Some(steps) = args.max_total_steps {
        config.max_total_steps = usize::try_from(steps)?;
    }
    if let Some(jitter) = args.jitter {
        config.jitter = jitter;
    }
    config.return_visited_elements |= args.raw_walks;
    Ok(config)
}

/// Log a short summary of what was generated.
fn report(output: &PlayoutOutput) {
    match output {
        PlayoutOutput::Log(log) => {
            let counts = log
                .activity_counts()
                .into_iter()
                .sorted()
                .map(|(activity, n)| format!("{activity}={n}"))
                .join(", ");
            info!(traces = log.len(), events = log.event_count(), "activities: {counts}");
        },
        PlayoutOutput::Walks(walks) => {
            let steps: usize = walks.iter().map(|w| w.steps.len()).sum();
            info!(walks = walks.len(), steps, "raw walks generated");
        },
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Conform to crate-standard logging.
    pn_core::logging::setup(&args.verbosity);

    let accepting = load_net(&args.net)?;
    let config = playout_config(&args)?;
    info!(
        net = accepting.net.name(),
        initial = %accepting.initial_marking,
        no_traces = config.no_traces,
        "Starting playout"
    );

    let mut rng = args.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let output = play_out(
        &TokenGame,
        &accepting.net,
        &accepting.initial_marking,
        accepting.final_marking.as_ref(),
        &config,
        &mut rng,
    )?;
    report(&output);

    let output_path = match args.output {
        Some(path) => path,
        None => {
            let dir = create_timestamped_output_dir()?;
            write_dot_file(&dir, "net.dot", &accepting.net.to_dot())?;
            dir.join(if config.return_visited_elements { "walks.json" } else { "log.json" })
        },
    };
    write_json(&output_path, &output.to_json()?)?;
    info!("Output written to: {}", output_path.display());

    Ok(())
}
