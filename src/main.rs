// Command-line front-end: runs the same pipeline as the studio on image files.
//
//   cargo run --bin rps-predict -- --model best-model.json hand.jpg

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use rps_predict::cli::ModelArgs;
use rps_predict::logging::init_tracing;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    /// Images to score
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let predictor = args.model.predictor();

    let mut failures = 0;
    for path in &args.images {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        match predictor.predict(&bytes) {
            Ok(scores) => println!("{}: Result: {}", path.display(), scores),
            Err(e) => {
                failures += 1;
                println!("{}: Result: {}", path.display(), e.user_message());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} images failed", failures, args.images.len());
    }
    Ok(())
}
