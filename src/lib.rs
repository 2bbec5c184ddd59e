//! # sidecrop
//!
//! A stateless HTTP service that fetches a remote image, crops it with a
//! deterministic window biased toward one horizontal side, resizes to a
//! fixed output size, and serves the result as JPEG with immutable-cache
//! headers.
//!
//! ```text
//! GET /crop?src=<url>&focus=left|right&width=700&height=700
//! ```
//!
//! # Architecture: One Pass Per Request
//!
//! Every request flows through the same four stages, each a pure function
//! except where a collaborator does I/O:
//!
//! ```text
//! 1. normalize   query params → CropConfig   (validation + clamping)
//! 2. identify    CropConfig   → ETag         (parameter hash, pre-fetch)
//! 3. fetch       URL          → bytes        (bounded: timeout + size)
//! 4. crop        bytes        → JPEG         (geometry + codec)
//! ```
//!
//! There is no shared mutable state between requests and no server-side
//! retention: the configuration is read once at startup and every request's
//! outcome depends only on its own parameters and the bytes fetched at that
//! moment.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`params`] | Query validation and clamping into the canonical `CropConfig` |
//! | [`geometry`] | Pure crop-rectangle math: cover fit, zoom, focus bias |
//! | [`etag`] | Parameter-derived cache identity |
//! | [`fetch`] | `Fetcher` trait + streaming reqwest implementation |
//! | [`codec`] | `Codec` trait + `image`-crate decode/crop/resize/encode |
//! | [`pipeline`] | Orchestration of the four stages over the collaborator traits |
//! | [`server`] | axum router, cache headers, conditional requests |
//! | [`config`] | Environment-driven startup configuration |
//! | [`error`] | Validation / fetch / decode / encode taxonomy |
//!
//! # Design Decisions
//!
//! ## Parameter-Derived ETags
//!
//! The ETag hashes the normalized request parameters, not the output bytes.
//! This makes the identity available before (and independent of) the fetch,
//! so conditional requests can answer 304 without touching the network. The
//! flip side is accepted deliberately: a source image that changes under a
//! stable URL keeps its old tag. See [`etag`].
//!
//! ## Lenient Numbers, Strict URLs
//!
//! Only four request defects are errors: missing `src`, bad `focus`, a
//! non-http(s) URL, and a host outside the allow-list. Malformed numeric
//! parameters silently fall back to defaults and are clamped into safe
//! ranges. The asymmetry is intentional — URL handling is a security
//! boundary (SSRF), image dimensions are not.
//!
//! ## Collaborator Traits
//!
//! The network and the pixels sit behind the [`fetch::Fetcher`] and
//! [`codec::Codec`] traits. The pipeline is generic over both, so its
//! orchestration logic — ordering, failure propagation, bound passing — is
//! tested entirely with recording mocks, no sockets or codecs involved.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` crate (Lanczos3 resampling), all
//! statically linked: no ImageMagick, no system libraries, one binary.

pub mod codec;
pub mod config;
pub mod error;
pub mod etag;
pub mod fetch;
pub mod geometry;
pub mod params;
pub mod pipeline;
pub mod server;
