use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::parser::{Limits, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_HEADER_BYTES};
use crate::store::User;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "WEBCORE_CONFIG";
/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
    pub pages: PagesConfig,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub root: PathBuf,
}

/// Page paths and template markers the dispatcher and handlers consume.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub session_cookie: String,
    pub home_path: String,
    pub login_path: String,
    pub login_failed_path: String,
    pub user_list_path: String,
    /// Text replaced by the user's name on HTML pages when logged in.
    pub login_placeholder: String,
    /// Marker on the list page replaced by one row per user.
    pub user_rows_placeholder: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 10,
            write_timeout_secs: 10,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./webapp"),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            session_cookie: "SID".to_string(),
            home_path: "/index.html".to_string(),
            login_path: "/user/login.html".to_string(),
            login_failed_path: "/user/login_failed.html".to_string(),
            user_list_path: "/user/list.html".to_string(),
            login_placeholder: "로그인".to_string(),
            user_rows_placeholder: "<tr></tr>".to_string(),
        }
    }
}

impl Config {
    /// Loads defaults, then the YAML file named by `WEBCORE_CONFIG` if set,
    /// then the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                Self::from_yaml(&raw).with_context(|| format!("parsing config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
