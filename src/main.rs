//! rimshot-puns: speak every pun in a feed and land it with a rimshot.

mod audio;
mod config;
mod feed;
mod markup;
mod pipeline;
mod synth;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::synth::SpeechSynthesizer;

#[derive(Parser, Debug)]
#[command(name = "rimshot-puns", about = "Speak puns with AWS Polly, each followed by a rimshot")]
struct Args {
    /// Output folder for the generated WAV files
    #[arg(short, long)]
    output: PathBuf,

    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding kick*/crash* samples (overrides config)
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Seed for the rimshot picker, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging (suppress noisy AWS SDK internals)
    let filter = if args.verbose {
        EnvFilter::new("debug,aws_config=info,aws_smithy_runtime=info,hyper=info")
    } else {
        EnvFilter::new("info,aws_config=warn,aws_smithy_runtime=warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("rimshot-puns starting");

    let mut config = config::Config::load(args.config.as_deref());
    if let Some(dir) = args.samples {
        config.samples.dir = dir;
    }

    let polly = synth::polly::AwsPolly::new(&config.polly).await?;

    // Samples are decoded once and shared read-only by every joke
    let bank = audio::samples::SampleBank::load(&config.samples)?
        .conform_to(polly.sample_rate())?;

    let jokes = feed::JokeFeed::new(config.feed.clone())?.fetch().await?;

    let rng = match args.seed {
        Some(seed) => {
            info!("Rimshot seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut pipeline = pipeline::RimshotPipeline::new(&polly, &bank, rng);
    pipeline.run(&jokes, &args.output).await?;

    Ok(())
}
