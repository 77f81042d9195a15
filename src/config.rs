// Runtime configuration, read once from the environment at startup.

use std::path::PathBuf;

/// Default backend address used when `PRODUCT_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default tracing filter used when `PRODMAN_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

const LOG_FILE_NAME: &str = ".prodman.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the product/user API, without a trailing slash.
    pub base_url: String,
    /// `EnvFilter` directive for the log file.
    pub log_filter: String,
    /// Where log lines go. Stdout is reserved for the menus.
    pub log_file: PathBuf,
}

impl Config {
    /// Build a config from `PRODUCT_API_URL`, `PRODMAN_LOG` and
    /// `PRODMAN_LOG_FILE`, falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("PRODUCT_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let log_filter = lookup("PRODMAN_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        let log_file = lookup("PRODMAN_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_file);

        Config {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            log_filter,
            log_file,
        }
    }
}

fn default_log_file() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(LOG_FILE_NAME)
}
