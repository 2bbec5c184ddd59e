//! Request parameter validation and normalization.
//!
//! [`normalize`] turns the raw query-string parameters into a canonical,
//! bounded [`CropConfig`]. Exactly four conditions are hard failures:
//!
//! 1. `src` absent or empty
//! 2. `focus` absent or not (case-insensitively) `left`/`right`
//! 3. `src` not an absolute `http`/`https` URL
//! 4. a non-empty host allow-list is configured and the host is not on it
//!
//! Everything numeric is deliberately lenient instead: a `width` of
//! `"banana"` or `"-4"` silently falls back to the configured default, and
//! every numeric field is then clamped into its documented range. Malformed
//! numbers are never a validation error. Downstream code relies on the
//! clamping and does not re-validate.

use crate::config::{ServiceConfig, int_or};
use crate::error::ValidationError;
use serde::Deserialize;
use url::Url;

/// Raw query parameters as the HTTP layer hands them over.
///
/// Numeric fields stay `String` here on purpose: typed deserialization
/// would reject `width=abc` at the framework boundary, but the contract is
/// to fall back to the default instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParams {
    pub src: Option<String>,
    pub focus: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Horizontal side the crop window is biased toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Left,
    Right,
}

impl Focus {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Canonical request configuration. Immutable once built.
///
/// Every field is inside its clamp range by construction:
/// `width`/`height` in [50, 2000], `cut_percent` in [0.0, 0.60],
/// `zoom` in [1.0, 2.0], `jpeg_quality` in [40, 95].
#[derive(Debug, Clone, PartialEq)]
pub struct CropConfig {
    pub source_url: Url,
    pub focus: Focus,
    pub width: u32,
    pub height: u32,
    pub cut_percent: f64,
    pub zoom: f64,
    pub jpeg_quality: u8,
}

/// Validate and clamp raw parameters into a [`CropConfig`].
///
/// Pure function of its inputs; idempotent for identical raw parameters.
pub fn normalize(raw: &RawParams, cfg: &ServiceConfig) -> Result<CropConfig, ValidationError> {
    let src = raw
        .src
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingSrc)?;

    let focus = raw
        .focus
        .as_deref()
        .and_then(Focus::parse)
        .ok_or(ValidationError::InvalidFocus)?;

    let source_url = Url::parse(src).map_err(|_| ValidationError::InvalidUrl)?;
    if source_url.scheme() != "http" && source_url.scheme() != "https" {
        return Err(ValidationError::InvalidProtocol);
    }

    let host = source_url.host_str().unwrap_or_default();
    if !cfg.allowed_hosts.is_empty() && !cfg.allowed_hosts.iter().any(|h| h == host) {
        return Err(ValidationError::HostNotAllowed(host.to_string()));
    }

    let width = int_or(raw.width.clone(), cfg.default_width).clamp(50, 2000);
    let height = int_or(raw.height.clone(), cfg.default_height).clamp(50, 2000);

    Ok(CropConfig {
        source_url,
        focus,
        width,
        height,
        cut_percent: cfg.cut_percent.clamp(0.0, 0.60),
        zoom: cfg.zoom.clamp(1.0, 2.0),
        jpeg_quality: cfg.jpeg_quality.clamp(40, 95) as u8,
    })
}
