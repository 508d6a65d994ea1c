//! storebridge
//!
//! Browser session and HTTP bridging toolkit for storefront acceptance
//! tests. Drives the application through a browser and through direct
//! service calls against the same backend, and keeps the two views of
//! session state consistent: HTTP cookie jars are translated into the
//! live browser cookie store, window/frame context is multiplexed over
//! one session, and explicit waits gate on transient UI state.

pub mod cookies;
pub mod crypto;
pub mod data;
pub mod driver;
pub mod service;
pub mod session;
pub mod sync;
pub mod windows;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

/// Bridge configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Application base URL for the service layer
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Explicit wait timeout in seconds
    #[serde(default = "default_explicit_wait_secs")]
    pub explicit_wait_secs: u64,
    /// Polling interval for explicit waits in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Passphrase the credential cipher derives its key from
    #[serde(default)]
    pub secret_key: String,
}

fn default_base_url() -> String {
    "https://askomdch.com".to_string()
}

fn default_explicit_wait_secs() -> u64 {
    5
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            explicit_wait_secs: default_explicit_wait_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            secret_key: String::new(),
        }
    }
}

impl BridgeConfig {
    /// Config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("storebridge").join("config.json"))
    }

    /// Explicit wait timeout as a [`Duration`].
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }

    /// Wait polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    fn load_from(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                None
            }
        }
    }

    /// Save config to the default location.
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = std::fs::write(path, content) {
                    error!("Failed to save config: {}", e);
                } else {
                    info!("Config saved to {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize config: {}", e);
            }
        }
    }
}

/// Get log directory path (shared across modules)
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("storebridge").join("logs"))
}

/// Initialize tracing with console output and a daily-rolling log file.
///
/// Returns the non-blocking appender guard; hold it for the process
/// lifetime or file logging stops.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "storebridge.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}
