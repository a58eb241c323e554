// src/models/config.rs

//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PHPSESSID cookie value used to authenticate every request
    #[serde(default)]
    pub session_cookie: String,

    /// Filter traversal order. Insertion order is a deliberate ranking
    /// and is respected verbatim.
    #[serde(default = "defaults::priorities")]
    pub priorities: Vec<String>,

    /// Filter name to URL template under `/giveaways/`. Each template
    /// carries one `{page}` placeholder.
    #[serde(default = "defaults::filters")]
    pub filters: BTreeMap<String, String>,

    /// Whether promoted/sticky giveaways are entered at all
    #[serde(default)]
    pub enter_pinned_games: bool,

    /// Balance threshold below which no entry attempts are made
    #[serde(default = "defaults::min_points")]
    pub min_points: u32,

    /// HTTP client and retry behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Submission pacing and idle-wait settings
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.session_cookie.trim().is_empty() {
            return Err(AppError::config("session_cookie is empty"));
        }
        if self.min_points == 0 {
            return Err(AppError::config("min_points must be > 0"));
        }
        if self.priorities.is_empty() {
            return Err(AppError::config("No priorities defined"));
        }
        for name in &self.priorities {
            let Some(template) = self.filters.get(name) else {
                return Err(AppError::config(format!(
                    "priority '{name}' has no matching filter template"
                )));
            };
            if !template.contains("{page}") {
                return Err(AppError::config(format!(
                    "filter '{name}' template is missing the {{page}} placeholder"
                )));
            }
        }
        url::Url::parse(&self.http.base_url)?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.http.max_retries == 0 {
            return Err(AppError::config("http.max_retries must be > 0"));
        }
        if self.pacing.entry_delay_min_secs > self.pacing.entry_delay_max_secs {
            return Err(AppError::config(
                "pacing.entry_delay_min_secs must not exceed entry_delay_max_secs",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_cookie: String::new(),
            priorities: defaults::priorities(),
            filters: defaults::filters(),
            enter_pinned_games: false,
            min_points: defaults::min_points(),
            http: HttpConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

/// HTTP client and retry behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL of the target site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Attempt ceiling for transient failures
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Backoff base in milliseconds, doubled per attempt
    #[serde(default = "defaults::backoff_base")]
    pub backoff_base_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            backoff_base_ms: defaults::backoff_base(),
        }
    }
}

/// Submission pacing and idle-wait settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Lower bound of the pause after an entry attempt, in seconds
    #[serde(default = "defaults::entry_delay_min")]
    pub entry_delay_min_secs: u64,

    /// Upper bound of the pause after an entry attempt, in seconds
    #[serde(default = "defaults::entry_delay_max")]
    pub entry_delay_max_secs: u64,

    /// Cycle-level wait once filters or points are exhausted, in seconds
    #[serde(default = "defaults::idle_wait")]
    pub idle_wait_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            entry_delay_min_secs: defaults::entry_delay_min(),
            entry_delay_max_secs: defaults::entry_delay_max(),
            idle_wait_secs: defaults::idle_wait(),
        }
    }
}

mod defaults {
    use std::collections::BTreeMap;

    pub fn priorities() -> Vec<String> {
        ["wishlist", "recommended", "copies", "dlc", "new", "all"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn filters() -> BTreeMap<String, String> {
        [
            ("wishlist", "search?page={page}&type=wishlist"),
            ("recommended", "search?page={page}&type=recommended"),
            ("copies", "search?page={page}&copy_min=2"),
            ("dlc", "search?page={page}&dlc=true"),
            ("new", "search?page={page}&type=new"),
            ("all", "search?page={page}"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    pub fn min_points() -> u32 {
        50
    }

    // HTTP defaults
    pub fn base_url() -> String {
        "https://www.steamgifts.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sgbot/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_retries() -> u32 {
        5
    }
    pub fn backoff_base() -> u64 {
        300
    }

    // Pacing defaults
    pub fn entry_delay_min() -> u64 {
        3
    }
    pub fn entry_delay_max() -> u64 {
        7
    }
    pub fn idle_wait() -> u64 {
        900
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> Config {
        Config {
            session_cookie: "abc123".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn validate_accepts_config_with_cookie() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_cookie() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_min_points() {
        let mut config = valid_config();
        config.min_points = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_priority() {
        let mut config = valid_config();
        config.priorities.push("no-such-filter".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_page_placeholder() {
        let mut config = valid_config();
        config
            .filters
            .insert("broken".to_string(), "search?page=1".to_string());
        config.priorities = vec!["broken".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_delay_range() {
        let mut config = valid_config();
        config.pacing.entry_delay_min_secs = 9;
        config.pacing.entry_delay_max_secs = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
session_cookie = "deadbeef"
min_points = 120
priorities = ["wishlist"]

[pacing]
idle_wait_secs = 60
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.session_cookie, "deadbeef");
        assert_eq!(config.min_points, 120);
        assert_eq!(config.priorities, vec!["wishlist".to_string()]);
        assert_eq!(config.pacing.idle_wait_secs, 60);
        // Unspecified sections fall back to defaults
        assert_eq!(config.http.max_retries, 5);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert!(config.session_cookie.is_empty());
        assert_eq!(config.min_points, 50);
    }
}
