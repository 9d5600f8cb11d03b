use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, anyhow, bail};

pub const DB_VAR: &str = "NEWSDESK_DB";
pub const ADDR_VAR: &str = "NEWSDESK_ADDR";
pub const LOG_FORMAT_VAR: &str = "NEWSDESK_LOG_FORMAT";

const DEFAULT_ADDR: &str = "127.0.0.1:9090";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let db_path = lookup(DB_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("{DB_VAR} environment variable is not set"))?;

        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("invalid {ADDR_VAR}: {addr}"))?;

        let log_format = match lookup(LOG_FORMAT_VAR).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("invalid {LOG_FORMAT_VAR}: {other}. Allowed: text, json"),
        };

        Ok(Config {
            db_path,
            addr,
            log_format,
        })
    }
}
