//! Server configuration
//!
//! Built once at startup from, lowest precedence first: defaults, an optional
//! YAML file, `COURIER_*` environment variables and command-line flags.
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 4221
//! directory: /tmp/files
//! max_request_bytes: 65536
//! read_timeout_ms: 10000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::http::connection::Limits;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root directory for `/files/`
    pub directory: PathBuf,
    pub max_request_bytes: usize,
    pub read_timeout_ms: u64,
    pub shutdown_grace_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4221,
            directory: PathBuf::from("./files"),
            max_request_bytes: 64 * 1024,
            read_timeout_ms: 10_000,
            shutdown_grace_ms: 5_000,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    /// Applies `COURIER_*` variables found through `lookup`.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        if let Some(host) = lookup("COURIER_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "COURIER_PORT")? {
            self.port = port;
        }
        if let Some(directory) = lookup("COURIER_DIRECTORY") {
            self.directory = PathBuf::from(directory);
        }
        if let Some(max) = parse_var(&lookup, "COURIER_MAX_REQUEST_BYTES")? {
            self.max_request_bytes = max;
        }
        if let Some(ms) = parse_var(&lookup, "COURIER_READ_TIMEOUT_MS")? {
            self.read_timeout_ms = ms;
        }
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_request_bytes == 0 {
            bail!("max_request_bytes must be greater than zero");
        }
        if self.read_timeout_ms == 0 {
            bail!("read_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_request_bytes: self.max_request_bytes,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} has invalid value {:?}", key, raw))
        })
        .transpose()
}
