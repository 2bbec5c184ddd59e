//! Deterministic cache identity.
//!
//! The ETag is a hash of the canonical request parameters in a fixed field
//! order — it deliberately does NOT depend on the fetched bytes. Two
//! requests with identical parameters always carry the same tag, even if
//! the remote image changes between them, so a source that mutates in place
//! under a stable URL will keep answering 304 to conditional requests.
//! That trade-off is inherited behavior, not an oversight; a content-hash
//! scheme would need the fetch to complete before the tag exists.

use crate::params::CropConfig;
use sha2::{Digest, Sha256};

/// Derive the quoted entity tag for a normalized configuration.
///
/// Equal configs produce equal tags; changing any single field changes the
/// tag. Works before (and independent of) any network access.
pub fn derive_etag(cfg: &CropConfig) -> String {
    let key = format!(
        "{}|{}|{}x{}|cut={}|zoom={}|q={}",
        cfg.source_url,
        cfg.focus.as_str(),
        cfg.width,
        cfg.height,
        cfg.cut_percent,
        cfg.zoom,
        cfg.jpeg_quality
    );
    let digest = Sha256::digest(key.as_bytes());
    format!("\"{:x}\"", digest)
}
