use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    let raw = fs::read_to_string(config_path).ok();
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then the flat TOML file, then environment variables.
pub fn load_settings_from(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("base_url") {
                    settings.base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => {
                // The subscriber is not installed yet.
                eprintln!("ignoring unreadable dashboard settings file: {err}");
            }
        }
    }

    if let Some(v) = env("DASHBOARD_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("DASHBOARD_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

pub fn validate_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("users service base url '{raw}' is not a valid url"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("users service base url '{raw}' must use http or https, not '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_point_at_local_service() {
        let settings = load_settings_from(None, no_env);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_url, "http://localhost:8000");
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = load_settings_from(
            Some("base_url = \"http://users.internal:9000\"\nlog_filter = \"debug\"\n"),
            no_env,
        );
        assert_eq!(settings.base_url, "http://users.internal:9000");
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn app_prefixed_env_wins_over_file_and_plain_env() {
        let settings = load_settings_from(Some("base_url = \"http://file:1\""), |name| match name {
            "DASHBOARD_BASE_URL" => Some("http://plain:2".to_string()),
            "APP__BASE_URL" => Some("http://app:3".to_string()),
            _ => None,
        });
        assert_eq!(settings.base_url, "http://app:3");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let settings = load_settings_from(Some("base_url = ["), no_env);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(validate_base_url("http://localhost:8000").is_ok());
        assert!(validate_base_url(" https://users.example.com/api ").is_ok());
        assert!(validate_base_url("ftp://localhost").is_err());
        assert!(validate_base_url("localhost:8000").is_err());
    }
}
