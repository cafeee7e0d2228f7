//! Runtime configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable names
pub mod env_vars {
    /// Directory holding the local note storage and the share server database.
    pub const DATA_DIR: &str = "BLANKPAGE_DATA_DIR";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    /// Origin of the share service used by the editor (e.g. "https://blank.example.com").
    pub const SERVER: &str = "BLANKPAGE_SERVER";
    pub const STATIC_DIR: &str = "BLANKPAGE_STATIC_DIR";
}

/// Default values
pub mod defaults {
    pub const DATA_DIR: &str = ".blankpage";
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const SERVER: &str = "http://127.0.0.1:8080";
    pub const STATIC_DIR: &str = "static";
    pub const LOCAL_DB: &str = "local";
    pub const SERVER_DB: &str = "server";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub server: String,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load `.env` (if any) and read the environment.
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_err() {
            log::debug!("No .env file found, using system environment variables");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid {}={:?}", env_vars::PORT, raw);
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self {
            data_dir: PathBuf::from(
                lookup(env_vars::DATA_DIR).unwrap_or_else(|| defaults::DATA_DIR.to_string()),
            ),
            host: lookup(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            server: lookup(env_vars::SERVER)
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| defaults::SERVER.to_string()),
            static_dir: PathBuf::from(
                lookup(env_vars::STATIC_DIR).unwrap_or_else(|| defaults::STATIC_DIR.to_string()),
            ),
        }
    }

    /// Path of the sled database backing the editor's local storage.
    pub fn local_db_path(&self) -> PathBuf {
        self.data_dir.join(defaults::LOCAL_DB)
    }

    /// Path of the sled database holding shared notes.
    pub fn server_db_path(&self) -> PathBuf {
        self.data_dir.join(defaults::SERVER_DB)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
