//! Service configuration.
//!
//! All configuration is environment-driven and read exactly once at startup
//! into an immutable [`ServiceConfig`], which is then passed explicitly to
//! the components that need it. Nothing in the crate reads the environment
//! after startup, which keeps normalization and the pipeline pure functions
//! of their arguments.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ALLOWED_HOSTS` | empty | Comma-separated host allow-list; empty allows any host |
//! | `DEFAULT_WIDTH` | 700 | Output width when the request omits `width` |
//! | `DEFAULT_HEIGHT` | 700 | Output height when the request omits `height` |
//! | `CUT_PERCENT` | 0.30 | Fraction of the horizontal shift budget applied toward the focus side |
//! | `ZOOM` | 1.20 | Crop-window shrink factor (magnification after resize) |
//! | `JPEG_QUALITY` | 85 | Output JPEG quality |
//! | `FETCH_TIMEOUT_MS` | 8000 | Source fetch timeout |
//! | `MAX_IMAGE_BYTES` | 15000000 | Streaming ceiling on the fetched body |
//! | `PORT` | 3000 | Listen port |
//!
//! Parsing is lenient: a variable that is unset, unparsable, or non-positive
//! (for integers) falls back to its default. Range clamping happens later,
//! in [`params::normalize`](crate::params::normalize), together with the
//! request parameters.

use std::env;
use std::time::Duration;

/// Immutable process-wide configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Hosts the `src` URL may point at. Empty means any host is allowed.
    pub allowed_hosts: Vec<String>,
    pub default_width: u32,
    pub default_height: u32,
    pub cut_percent: f64,
    pub zoom: f64,
    pub jpeg_quality: u32,
    pub fetch_timeout: Duration,
    pub max_image_bytes: u64,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: Vec::new(),
            default_width: 700,
            default_height: 700,
            cut_percent: 0.30,
            zoom: 1.20,
            jpeg_quality: 85,
            fetch_timeout: Duration::from_millis(8000),
            max_image_bytes: 15_000_000,
            port: 3000,
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key → value lookup.
    ///
    /// `from_env` delegates here; tests pass closures instead of mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let allowed_hosts = lookup("ALLOWED_HOSTS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            allowed_hosts,
            default_width: int_or(lookup("DEFAULT_WIDTH"), defaults.default_width),
            default_height: int_or(lookup("DEFAULT_HEIGHT"), defaults.default_height),
            cut_percent: float_or(lookup("CUT_PERCENT"), defaults.cut_percent),
            zoom: float_or(lookup("ZOOM"), defaults.zoom),
            jpeg_quality: int_or(lookup("JPEG_QUALITY"), defaults.jpeg_quality),
            fetch_timeout: Duration::from_millis(int_or(lookup("FETCH_TIMEOUT_MS"), 8000) as u64),
            max_image_bytes: int_or(lookup("MAX_IMAGE_BYTES"), 15_000_000) as u64,
            port: int_or(lookup("PORT"), defaults.port as u32).min(u16::MAX as u32) as u16,
        }
    }
}

/// Parse a positive integer, falling back on anything unparsable or zero.
pub(crate) fn int_or(value: Option<String>, fallback: u32) -> u32 {
    value
        .as_deref()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(fallback)
}

/// Parse a finite float, falling back on anything unparsable.
pub(crate) fn float_or(value: Option<String>, fallback: f64) -> f64 {
    value
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn allowed_hosts_splits_and_trims() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(
            "ALLOWED_HOSTS",
            "images.example.com, cdn.example.com ,,",
        )]));
        assert_eq!(
            config.allowed_hosts,
            vec!["images.example.com", "cdn.example.com"]
        );
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("DEFAULT_WIDTH", "banana"),
            ("CUT_PERCENT", "lots"),
            ("JPEG_QUALITY", "0"),
        ]));
        assert_eq!(config.default_width, 700);
        assert_eq!(config.cut_percent, 0.30);
        assert_eq!(config.jpeg_quality, 85);
    }

    #[test]
    fn explicit_values_are_taken_unclamped() {
        // Range clamping is normalize()'s job, not config loading's.
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("DEFAULT_WIDTH", "5000"),
            ("ZOOM", "9.5"),
            ("FETCH_TIMEOUT_MS", "250"),
        ]));
        assert_eq!(config.default_width, 5000);
        assert_eq!(config.zoom, 9.5);
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
    }

    #[test]
    fn int_or_rejects_negative_and_zero() {
        assert_eq!(int_or(Some("-3".into()), 7), 7);
        assert_eq!(int_or(Some("0".into()), 7), 7);
        assert_eq!(int_or(Some(" 42 ".into()), 7), 42);
    }
}
