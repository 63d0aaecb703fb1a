//! The configuration for the collector.

use config::ConfigError;
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// The top level configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// The endpoints to listen on, one shard expected per endpoint.
    pub endpoints: Vec<SocketAddr>,

    /// The number of shards required to reconstruct the secret.
    pub threshold: usize,

    /// The per-endpoint collection timeout.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    /// Load the configuration from a path.
    ///
    /// Any of the configuration properties can also be overridden by using environment
    /// variables. For example, the `threshold` property can be set by using `THRESHOLD=3`.
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        let source = config::File::from(path).format(config::FileFormat::Yaml);
        let config = config::Config::builder()
            .add_source(source)
            .add_source(config::Environment::default().separator("__"))
            .build()?;
        config.try_deserialize()
    }
}
