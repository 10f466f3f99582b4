use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::error::ServiceError;

pub const DEFAULT_API_BASE_URL: &str =
    "https://ecommerce-website-backend-with-nod-js-and-mongodb.vercel.app";
pub const DEFAULT_SUCCESS_MARKER: &str = "Product added successfully!";
pub const SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Request `/products/` instead of `/products` when listing.
    pub list_trailing_slash: bool,
    /// Exact create-response message that marks a product as added.
    pub success_marker: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            list_trailing_slash: false,
            success_marker: DEFAULT_SUCCESS_MARKER.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Defaults, then `catalog.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

pub(crate) fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("list_trailing_slash") {
        settings.list_trailing_slash = parse_flag(v)
            .with_context(|| format!("list_trailing_slash must be true or false, got '{v}'"))?;
    }
    if let Some(v) = file_cfg.get("success_marker") {
        settings.success_marker = v.clone();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("request_timeout_secs must be a number, got '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("CATALOG_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__LIST_TRAILING_SLASH") {
        if let Some(flag) = parse_flag(&v) {
            settings.list_trailing_slash = flag;
        }
    }

    if let Some(v) = lookup("APP__SUCCESS_MARKER") {
        settings.success_marker = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

/// Trims whitespace and trailing slashes and checks the result is an http(s) url.
pub fn normalize_base_url(raw: &str) -> Result<String, ServiceError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ServiceError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    Ok(trimmed.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
