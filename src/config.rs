//! Server configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_CATALOG_DIR: &str = "data/stores";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory of `*.json` store files seeded into the catalog.
    pub catalog_dir: PathBuf,
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `CATALOG_DIR`. Missing or unparsable values
    /// fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            host: env_parse("HOST", DEFAULT_HOST),
            port: env_parse("PORT", DEFAULT_PORT),
            catalog_dir: std::env::var("CATALOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_DIR)),
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
