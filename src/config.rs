//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Datasets ===
    /// Provider dataset (JSON array of provider records).
    #[serde(default = "default_providers_path")]
    pub providers_path: PathBuf,

    /// Plan dataset (JSON array of plan records).
    #[serde(default = "default_plans_path")]
    pub plans_path: PathBuf,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    // === Server Configuration ===
    /// Listen host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_providers_path() -> PathBuf {
    PathBuf::from("data/providers.json")
}

fn default_plans_path() -> PathBuf {
    PathBuf::from("data/plans.json")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers_path: default_providers_path(),
            plans_path: default_plans_path(),
            static_dir: default_static_dir(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.providers_path.as_os_str().is_empty() {
            return Err("PROVIDERS_PATH must not be empty".to_string());
        }

        if self.plans_path.as_os_str().is_empty() {
            return Err("PLANS_PATH must not be empty".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("HOST must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        Ok(())
    }

    /// Address the HTTP server binds to, as `host:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
