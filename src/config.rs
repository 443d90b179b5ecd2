// Runtime configuration, read from the environment

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SWIFT_DB_PATH";
pub const ENV_BIND_ADDR: &str = "SWIFT_BIND_ADDR";
pub const ENV_IMPORT_CSV: &str = "SWIFT_IMPORT_CSV";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// CSV loaded once at startup when the store is still empty
    pub import_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("swift_codes.db"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            import_csv: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(addr) = get(ENV_BIND_ADDR) {
            config.bind_addr = addr
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_BIND_ADDR, addr))?;
        }

        config.import_csv = get(ENV_IMPORT_CSV).map(PathBuf::from);

        Ok(config)
    }
}
