#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

use anyhow::{bail, Context, Error};
use clap::Parser;
use crate::config::Config;
use math_lib::fields::PrimeField;
use sharding::{encoding::decode_secret, protocol::recover_secret, shard::Shard};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transport::{errors::CollectError, integrity::verify_announcement, receiver::ShardCollector};

mod config;

/// Collects one shard per endpoint and reconstructs the secret they were dealt from.
#[derive(Parser)]
struct Cli {
    /// The path to the config file.
    #[clap(env)]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let _ = std::env::var("RUST_LOG").map_err(|_| std::env::set_var("RUST_LOG", "collector=info,transport=info"));
    init_tracing();

    let config = Config::new(cli.config_path).context("failed loading configuration")?;
    let field = PrimeField::mersenne_521();

    let collector =
        ShardCollector::bind(&config.endpoints, field, config.timeout).await.context("failed binding listeners")?;
    for endpoint in collector.local_addrs() {
        info!(%endpoint, "listening for a shard");
    }

    let session = collector.collect().await.map_err(classify)?;
    info!(shards = session.shards.len(), "collection finished");
    if session.shards.len() < config.threshold {
        bail!("collected {} shards but the threshold is {}", session.shards.len(), config.threshold);
    }

    let recovery_set: Vec<Shard> = session.shards.iter().take(config.threshold).cloned().collect();
    let element = recover_secret(&recovery_set).context("secret recovery failed")?;
    let secret =
        decode_secret(&element).context("integrity failure: the recovered value is not a well formed secret")?;
    verify_announcement(session.announced.as_ref(), &secret).context("integrity failure")?;
    info!("recovered secret matches its announcement");
    print_secret(secret);
    Ok(())
}

fn init_tracing() {
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);
    tracing_subscriber::registry().with(EnvFilter::from_default_env()).with(stdout_layer).init();
}

/// Tells tampering apart from plain delivery failures.
fn classify(error: CollectError) -> Error {
    let attack = matches!(error, CollectError::ChecksumMismatch { .. } | CollectError::NonceReplayed { .. });
    let context = if attack { "attack detected, session aborted" } else { "shard collection failed" };
    Error::new(error).context(context)
}

/// Prints the secret, hex encoded when it is not valid utf8.
fn print_secret(secret: Vec<u8>) {
    match String::from_utf8(secret) {
        Ok(secret) => println!("{secret}"),
        Err(error) => {
            info!("recovered secret is not valid utf8, printing it hex encoded");
            println!("{}", hex::encode(error.as_bytes()));
        }
    }
}
