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

use anyhow::{Context, Error};
use clap::Parser;
use crate::config::Config;
use math_lib::fields::PrimeField;
use sharding::{encoding::encode_secret, protocol::ShardDealer};
use std::{io::BufRead, path::PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transport::{integrity::SecretHash, sender::ShardSender};

mod config;

/// Splits a secret and delivers one shard to each configured endpoint.
#[derive(Parser)]
struct Cli {
    /// The path to the config file.
    #[clap(env)]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let _ = std::env::var("RUST_LOG").map_err(|_| std::env::set_var("RUST_LOG", "dealer=info,transport=info"));
    init_tracing();

    let config = Config::new(cli.config_path).context("failed loading configuration")?;
    let secret = read_secret()?;

    let field = PrimeField::mersenne_521();
    let shard_count = config.endpoints.len();
    let dealer = ShardDealer::new(field.clone(), shard_count, config.threshold)
        .context("invalid dealing configuration")?;
    let element = encode_secret(&field, secret.as_bytes()).context("secret does not fit the field")?;
    let announcement = SecretHash::of(secret.as_bytes());

    info!(shard_count, threshold = config.threshold, "dealing shards");
    let shards = dealer.deal(&element, &mut rand::thread_rng());

    let sender = ShardSender::new(config.timeout);
    sender.send_shards(&config.endpoints, &shards, &announcement).await.context("shard delivery failed")?;
    info!(hash = %announcement, "all shards delivered");
    Ok(())
}

fn init_tracing() {
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);
    tracing_subscriber::registry().with(EnvFilter::from_default_env()).with(stdout_layer).init();
}

/// Reads the secret as one line, from a prompt or a pipe.
fn read_secret() -> Result<String, Error> {
    eprint!("Enter the secret to split: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).context("failed reading the secret")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
