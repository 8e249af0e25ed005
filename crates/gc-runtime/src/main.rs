//! # Groestl-Chain Runtime
//!
//! ```text
//! gc-runtime verify --chain headers.json [--network testnet] [--params params.json]
//! gc-runtime hash <hex>
//! ```
//!
//! Network parameters come from `--params`, then `--network`, then the
//! `GC_PARAMS_FILE` / `GC_NETWORK` environment variables.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gc_difficulty::{DifficultyVerifier, Network, NetworkParams};
use gc_pow_hash::{auto_detect, groestl512, pow_hash};
use gc_runtime::{verify_chain, ChainFile};
use gc_telemetry::{gather_metrics, init_logging, TelemetryConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gc-runtime")]
#[command(about = "Groestl-Chain difficulty and proof-of-work verifier")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify a JSON header chain
    Verify {
        /// Chain file
        #[arg(short, long)]
        chain: PathBuf,

        /// Network preset (mainnet, testnet, regtest, signet)
        #[arg(short, long)]
        network: Option<String>,

        /// JSON parameter file, overrides --network
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Skip the hash-below-target check
        #[arg(long)]
        skip_pow: bool,

        /// Print Prometheus metrics after the run
        #[arg(long)]
        metrics: bool,
    },

    /// Print the proof-of-work hash of hex-encoded bytes
    Hash {
        /// Input bytes as hex
        input: String,

        /// Also print the single Groestl-512 digest
        #[arg(long)]
        single: bool,
    },
}

fn load_params(network: Option<String>, params: Option<PathBuf>) -> Result<NetworkParams> {
    if let Some(path) = params {
        return NetworkParams::from_json_file(&path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()));
    }
    if let Some(name) = network {
        let network: Network = name.parse()?;
        return Ok(NetworkParams::for_network(network));
    }
    NetworkParams::from_env().context("Failed to load network parameters")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&TelemetryConfig::for_service("gc-runtime"))
        .context("Failed to initialize logging")?;

    match args.command {
        Command::Verify {
            chain,
            network,
            params,
            skip_pow,
            metrics,
        } => {
            let params = load_params(network, params)?;
            info!(network = %params.network, "Loaded network parameters");

            let verifier = DifficultyVerifier::new(params)?;
            let chain = ChainFile::load(&chain)?;
            let hasher = auto_detect();
            let report = verify_chain(&verifier, hasher.as_ref(), &chain, !skip_pow)?;

            if metrics {
                print!("{}", gather_metrics()?);
            }

            match report.rejection {
                None => println!("OK: {} headers verified", report.verified),
                Some(rejection) => bail!(
                    "header {} at height {} rejected: {} ({} verified before it)",
                    rejection.hash,
                    rejection.height,
                    rejection.reason,
                    report.verified
                ),
            }
        }
        Command::Hash { input, single } => {
            let bytes = hex::decode(input.trim()).context("Input is not valid hex")?;
            println!("{}", hex::encode(pow_hash(&bytes)));
            if single {
                println!("{}", hex::encode(groestl512(&bytes)));
            }
        }
    }
    Ok(())
}
