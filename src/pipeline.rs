//! Request orchestration.
//!
//! [`process`] runs one crop request end to end over the two collaborator
//! traits: derive the ETag (no network needed), fetch the source bytes,
//! read dimensions, compute the crop rectangle, and hand the codec the
//! extract/resize/encode step. No retries anywhere; every failure
//! propagates as a tagged [`PipelineError`] for the HTTP layer to classify.

use crate::codec::Codec;
use crate::config::ServiceConfig;
use crate::error::PipelineError;
use crate::etag::derive_etag;
use crate::fetch::Fetcher;
use crate::geometry::compute_crop;
use crate::params::CropConfig;

/// One finished crop: output bytes plus response metadata. Returned to the
/// caller and discarded; nothing is retained server-side.
#[derive(Debug, Clone)]
pub struct CropResult {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub etag: String,
}

/// Process one normalized request.
pub async fn process(
    cfg: &CropConfig,
    service: &ServiceConfig,
    fetcher: &impl Fetcher,
    codec: &impl Codec,
) -> Result<CropResult, PipelineError> {
    // Identity first: depends only on the parameters, so it exists whether
    // or not the fetch below succeeds.
    let etag = derive_etag(cfg);

    let bytes = fetcher
        .fetch(&cfg.source_url, service.fetch_timeout, service.max_image_bytes)
        .await?;
    tracing::debug!(url = %cfg.source_url, bytes = bytes.len(), "fetched source image");

    let dims = codec.read_dimensions(&bytes)?;
    let rect = compute_crop(dims, cfg);
    tracing::debug!(?rect, width = dims.width(), height = dims.height(), "computed crop");

    let out = codec.extract_resize_encode(&bytes, rect, cfg.width, cfg.height, cfg.jpeg_quality)?;

    Ok(CropResult {
        bytes: out,
        content_type: "image/jpeg",
        etag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tests::{MockCodec, RecordedOp};
    use crate::error::{DecodeError, FetchError};
    use crate::fetch::tests::MockFetcher;
    use crate::geometry::{CropRect, Dimensions};
    use crate::params::Focus;
    use url::Url;

    fn config() -> CropConfig {
        CropConfig {
            source_url: Url::parse("https://images.example.com/a.jpg").unwrap(),
            focus: Focus::Left,
            width: 700,
            height: 700,
            cut_percent: 0.30,
            zoom: 1.0,
            jpeg_quality: 85,
        }
    }

    #[tokio::test]
    async fn full_run_over_mocks() {
        let cfg = config();
        let service = ServiceConfig::default();
        let fetcher = MockFetcher::returning(vec![9u8; 128]);
        let codec = MockCodec::with_dimensions(vec![Dimensions::new(4000, 2000).unwrap()]);

        let result = process(&cfg, &service, &fetcher, &codec).await.unwrap();
        assert_eq!(result.content_type, "image/jpeg");
        assert_eq!(result.etag, derive_etag(&cfg));
        assert!(!result.bytes.is_empty());

        // The fetch got the configured bounds.
        let calls = fetcher.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].timeout, service.fetch_timeout);
        assert_eq!(calls[0].max_bytes, service.max_image_bytes);

        // The codec got the worked-example rectangle and output parameters.
        let ops = codec.get_operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[1],
            RecordedOp::ExtractResizeEncode {
                rect: CropRect {
                    x: 400,
                    y: 0,
                    width: 2000,
                    height: 2000
                },
                out_w: 700,
                out_h: 700,
                quality: 85,
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_stops_before_the_codec() {
        let cfg = config();
        let fetcher = MockFetcher::failing(FetchError::TooLarge(15_000_000));
        let codec = MockCodec::with_dimensions(vec![Dimensions::new(100, 100).unwrap()]);

        let err = process(&cfg, &ServiceConfig::default(), &fetcher, &codec)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(FetchError::TooLarge(_))));
        assert!(codec.get_operations().is_empty());
    }

    #[tokio::test]
    async fn unreadable_dimensions_become_a_decode_error() {
        let cfg = config();
        let fetcher = MockFetcher::returning(vec![0u8; 8]);
        let codec = MockCodec::with_dimensions(vec![]);

        let err = process(&cfg, &ServiceConfig::default(), &fetcher, &codec)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Decode(DecodeError::UnreadableDimensions)
        ));
        // Dimension read was attempted; the encode step never ran.
        assert_eq!(codec.get_operations().len(), 1);
    }

    #[tokio::test]
    async fn etag_does_not_depend_on_fetched_content() {
        let cfg = config();
        let service = ServiceConfig::default();

        let first = process(
            &cfg,
            &service,
            &MockFetcher::returning(vec![1u8; 64]),
            &MockCodec::with_dimensions(vec![Dimensions::new(800, 600).unwrap()]),
        )
        .await
        .unwrap();

        // Same parameters, different remote bytes: identical tag.
        let second = process(
            &cfg,
            &service,
            &MockFetcher::returning(vec![2u8; 4096]),
            &MockCodec::with_dimensions(vec![Dimensions::new(1234, 999).unwrap()]),
        )
        .await
        .unwrap();

        assert_eq!(first.etag, second.etag);
    }
}
