//! Error taxonomy for the crop service.
//!
//! Four failure classes, one per stage of a request:
//!
//! - [`ValidationError`] — bad, missing, or disallowed input. Always the
//!   caller's fault; surfaced verbatim as a 400 and never retried.
//! - [`FetchError`] — network failure, timeout, or oversize response while
//!   pulling the source image. Transient; the caller may retry, we don't.
//! - [`DecodeError`] — the fetched bytes are not a readable image. Permanent
//!   for that source.
//! - [`EncodeError`] — crop/resize/JPEG output generation failed. Internal.
//!
//! Everything after validation is collected into [`PipelineError`] at the
//! orchestration boundary. The HTTP layer logs the full detail and answers
//! with a generic body, so callers cannot distinguish fetch from decode from
//! encode failures by design.

use thiserror::Error;

/// A request parameter failed one of the four hard validation rules.
///
/// Display strings are part of the API: they are returned verbatim in the
/// 400 response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameter: src")]
    MissingSrc,
    #[error("Invalid focus. Use left or right.")]
    InvalidFocus,
    #[error("Invalid src URL")]
    InvalidUrl,
    #[error("Invalid src URL protocol")]
    InvalidProtocol,
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),
}

/// Fetching the source image failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("fetch timed out after {0} ms")]
    TimedOut(u64),
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("response body exceeded the maximum of {0} bytes")]
    TooLarge(u64),
}

/// The fetched bytes could not be decoded into an image.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Could not read image dimensions")]
    UnreadableDimensions,
    #[error("failed to decode image: {0}")]
    Malformed(String),
}

/// Producing the output JPEG failed.
#[derive(Error, Debug)]
#[error("failed to encode output image: {0}")]
pub struct EncodeError(pub String);

/// Any post-validation failure, tagged by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
