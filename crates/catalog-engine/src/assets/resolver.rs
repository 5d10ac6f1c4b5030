//! Asset resolution — total by construction.
//!
//! Every call produces either decoded pixel data or a typed placeholder; no
//! error ever reaches the layout engine, which therefore needs no failure
//! branch for images. Each attempt is independently deadline-bounded and an
//! expired attempt is abandoned, never awaited past the deadline.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::assets::fetcher::{HttpFetcher, ImageFetcher};
use crate::models::catalog::ImageRef;

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

/// Why a placeholder is being drawn instead of a real image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The item carries no image reference at all.
    NoImage,
    /// Fetch or decode failed (network error, corrupt data, unknown format).
    FetchFailed,
    /// The fetch did not complete within the deadline.
    Timeout,
}

/// Decoded RGB8 pixel data ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Raw RGB8 bytes, `width * height * 3` long.
    pub rgb: Vec<u8>,
}

/// The outcome of resolving one image reference. Consumed once by a theme
/// renderer and not retained.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedImage {
    Decoded(DecodedImage),
    Placeholder(PlaceholderReason),
}

impl ResolvedImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResolvedImage::Placeholder(_))
    }

    pub fn placeholder_reason(&self) -> Option<PlaceholderReason> {
        match self {
            ResolvedImage::Placeholder(reason) => Some(*reason),
            ResolvedImage::Decoded(_) => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

pub struct AssetResolver {
    fetcher: Arc<dyn ImageFetcher>,
    timeout: Duration,
}

impl AssetResolver {
    pub fn new(timeout: Duration) -> Self {
        AssetResolver {
            fetcher: Arc::new(HttpFetcher::new()),
            timeout,
        }
    }

    pub fn with_fetcher(fetcher: Arc<dyn ImageFetcher>, timeout: Duration) -> Self {
        AssetResolver { fetcher, timeout }
    }

    /// Resolves a single reference. Absent or blank references return
    /// `Placeholder(NoImage)` immediately with no network attempt.
    pub async fn resolve(&self, image_ref: Option<&ImageRef>) -> ResolvedImage {
        let image_ref = match image_ref {
            Some(r) => r,
            None => return ResolvedImage::Placeholder(PlaceholderReason::NoImage),
        };

        match image_ref {
            ImageRef::Bytes(bytes) => {
                if bytes.is_empty() {
                    return ResolvedImage::Placeholder(PlaceholderReason::NoImage);
                }
                decode(bytes)
            }
            ImageRef::Url(url) => {
                let url = url.trim();
                if url.is_empty() {
                    return ResolvedImage::Placeholder(PlaceholderReason::NoImage);
                }
                // An expired timeout drops the in-flight fetch future; the
                // attempt is abandoned rather than awaited past the deadline.
                match tokio::time::timeout(self.timeout, self.fetcher.fetch(url)).await {
                    Err(_elapsed) => {
                        debug!(url, timeout_ms = self.timeout.as_millis() as u64, "image fetch timed out");
                        ResolvedImage::Placeholder(PlaceholderReason::Timeout)
                    }
                    Ok(Err(err)) => {
                        debug!(url, error = %err, "image fetch failed");
                        ResolvedImage::Placeholder(PlaceholderReason::FetchFailed)
                    }
                    Ok(Ok(bytes)) => decode(&bytes),
                }
            }
        }
    }

    /// Walks an item's ordered reference list; the first reference that
    /// decodes wins. An exhausted list yields the last failure's placeholder
    /// (or `NoImage` when the list is empty).
    pub async fn resolve_primary(&self, refs: &[ImageRef]) -> ResolvedImage {
        let mut last = ResolvedImage::Placeholder(PlaceholderReason::NoImage);
        for image_ref in refs {
            match self.resolve(Some(image_ref)).await {
                decoded @ ResolvedImage::Decoded(_) => return decoded,
                placeholder => last = placeholder,
            }
        }
        last
    }
}

fn decode(bytes: &[u8]) -> ResolvedImage {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            ResolvedImage::Decoded(DecodedImage {
                width: rgb.width(),
                height: rgb.height(),
                rgb: rgb.into_raw(),
            })
        }
        Err(err) => {
            debug!(error = %err, "image decode failed");
            ResolvedImage::Placeholder(PlaceholderReason::FetchFailed)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
