//! Environment variable readers shared by the configuration types.

use crate::config::ConfigError;
use std::str::FromStr;
use tracing::warn;
use url::Url;

/// Returns the variable's value, treating unset and empty the same.
pub(crate) fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the variable's value or a [`ConfigError::MissingVar`].
pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    var(name).ok_or(ConfigError::MissingVar { name })
}

/// Reads a boolean flag. Only a case-insensitive `true` enables it.
pub(crate) fn flag(name: &str, default: bool) -> bool {
    match var(name) {
        Some(value) => value.trim().eq_ignore_ascii_case("true"),
        None => default,
    }
}

/// Reads a number, falling back to `default` when unset or unparseable.
pub(crate) fn number<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = var(name) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(var = name, value = %raw, %default, "Invalid number, using default");
            default
        }
    }
}

/// Reads a base URL, falling back to `default` when unset.
pub(crate) fn base_url(name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = var(name).unwrap_or_else(|| default.to_string());
    parse_base_url(name, &raw)
}

/// Parses and validates an http(s) base URL.
pub(crate) fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { name, source })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::ValidationError {
            name,
            message: format!("expected an http(s) base URL, got {url}"),
        });
    }
    Ok(url)
}
