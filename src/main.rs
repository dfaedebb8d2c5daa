mod args;
mod config;
mod credentials;
mod destinations;
mod error;
mod floor;
mod ledger;
mod pacer;
mod prompt;
mod randomizer;
mod scheduler;
mod types;

use anyhow::Result;
use args::Args;
use chrono::{DateTime, Local};
use clap::Parser;
use config::Config;
use credentials::load_credentials;
use destinations::generate_addresses;
use floor::resolve_transfer_floor;
use ledger::RpcLedger;
use pacer::SpinnerPacer;
use rand::{SeedableRng, rngs::StdRng};
use randomizer::Randomizer;
use scheduler::Distributor;
use std::time::{Duration, Instant};
use tracing::info;
use types::{InputMethod, RunCounters};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("{}", banner());

    let args = Args::parse();
    let config = Config::load_or_default(&args.config, args.config_is_explicit())?;

    // Everything below up to the ledger is validated before touching the network
    let inputs = {
        let mut input = std::io::stdin().lock();
        let mut output = std::io::stdout();
        prompt::resolve_inputs(
            args.method.as_deref(),
            args.count.as_deref(),
            config.default_address_count,
            &mut input,
            &mut output,
            |method| {
                let file = match method {
                    InputMethod::Mnemonic => &config.mnemonic_file,
                    InputMethod::RawKey => &config.private_key_file,
                };
                load_credentials(method, file)
            },
        )?
    };
    let credentials = inputs.credentials;
    info!(
        "Loaded {} source accounts ({})",
        credentials.len(),
        inputs.method
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut randomizer = Randomizer::new(rng, config.amount_range()?, config.pacing()?);

    let destinations = generate_addresses(inputs.address_count, randomizer.rng_mut())?;
    info!("Generated {} destination addresses", destinations.len());

    let ledger = RpcLedger::new(
        &config.rpc_url,
        Duration::from_secs(config.rpc_timeout_secs),
        Duration::from_secs(config.confirm_timeout_secs),
    );
    let floor = resolve_transfer_floor(&ledger).await;

    let started_at = Local::now();
    let start_time = Instant::now();

    let mut distributor = Distributor::new(ledger, SpinnerPacer, randomizer);
    let counters = distributor.run(&credentials, &destinations).await?;

    print_summary(&counters, floor, started_at, start_time.elapsed());
    Ok(())
}

fn banner() -> String {
    format!(
        "{} v{} - paced SOL distribution",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn print_summary(
    counters: &RunCounters,
    floor: f64,
    started_at: DateTime<Local>,
    elapsed: Duration,
) {
    println!("\n{:-^80}", " STATISTICS ");
    println!("Rent-exempt floor: {} SOL", floor);
    println!("Expected transfers: {}", counters.expected);
    println!("Attempted: {}", counters.attempted);
    println!("Successful: {}", counters.succeeded);
    println!("Failed: {}", counters.failed);
    println!("Average duration: {}ms", counters.average_duration_ms());
    println!(
        "Started: {}  Finished: {}",
        started_at.format("%Y-%m-%d %H:%M:%S"),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Total execution time: {}ms", elapsed.as_millis());
}
