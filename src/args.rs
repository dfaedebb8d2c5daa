use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(version = "0.1.0")]
#[command(about = "Paced SOL distribution to freshly generated addresses")]
#[command(
    long_about = "Sends small randomized SOL amounts from every funded account listed in the \
    credential file to a batch of newly generated addresses, one transfer at a time, \
    with a randomized pause between transfers."
)]
pub struct Args {
    /// Path to the YAML configuration file
    #[clap(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Input method: 0 (seed phrase) or 1 (private key). Prompted when omitted
    #[clap(short, long)]
    pub method: Option<String>,

    /// Number of destination addresses to generate. Prompted when omitted
    #[clap(short = 'n', long)]
    pub count: Option<String>,
}

impl Args {
    /// Whether `--config` points somewhere other than the default location.
    pub fn config_is_explicit(&self) -> bool {
        self.config != PathBuf::from(DEFAULT_CONFIG)
    }
}
