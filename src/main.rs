use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use usse_autogen::emit::OUTPUT_FILE;
use usse_autogen::{generate, rules};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate the GXP/USSE decoder table and handler stubs from JSON encoding rules"
)]
struct Opts {
    /// Path to the JSON rules document
    #[arg(value_name = "RULES_JSON")]
    rules: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let instructions = rules::load(Path::new(&opts.rules))?;
    let output = generate(&instructions)?;

    // Output accumulates in memory; a failed run never leaves a partial file.
    std::fs::write(OUTPUT_FILE, output).with_context(|| format!("writing {OUTPUT_FILE}"))?;

    Ok(())
}
