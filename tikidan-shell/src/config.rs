//! Shell configuration

use std::path::PathBuf;

/// Application-level configuration for the shell
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// HR backend base URL
    pub api_base_url: String,
    /// Directory holding the persisted session entries
    pub data_dir: PathBuf,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl ShellConfig {
    pub fn new(api_base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            data_dir: data_dir.into(),
            request_timeout: 30,
        }
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = seconds;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            api_base_url: std::env::var("TIKIDAN_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            data_dir: std::env::var("TIKIDAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            request_timeout: std::env::var("TIKIDAN_HTTP_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
