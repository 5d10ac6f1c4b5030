//! The render entry point — one call per catalog document.
//!
//! # Pipeline
//! 1. Validate the input once; structurally bad data fails fast with a typed
//!    error before any layout work.
//! 2. Assemble category groups (pure).
//! 3. Resolve images with bounded concurrency. `buffered` joins completions
//!    in catalog order, so concurrency changes wall-clock time and nothing
//!    else; themes without image slots skip this step entirely.
//! 4. Run the CPU-bound composition pass under `spawn_blocking` over owned
//!    inputs.
//!
//! # Cancellation
//! Dropping the future returned by [`CatalogRenderer::render`] cancels the
//! render: the resolution stream is lazy so no further fetches are issued,
//! in-flight fetches are dropped with it, and no document value exists until
//! composition finishes — a cancelled render produces nothing rather than a
//! truncated document.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::assets::fetcher::ImageFetcher;
use crate::assets::resolver::{AssetResolver, PlaceholderReason, ResolvedImage};
use crate::catalog::assembler::assemble;
use crate::config::RenderOptions;
use crate::errors::EngineError;
use crate::layout::engine::{compose, ComposeInput, ItemSlot, SectionSlot};
use crate::layout::geometry::PageGeometry;
use crate::models::catalog::{BusinessProfile, CatalogItem};
use crate::models::theme::ThemeDescriptor;
use crate::models::validate::validate_input;
use crate::themes::renderer_for;
use crate::writer::ComposedDocument;

/// Stateless render service. One instance can serve any number of renders;
/// nothing is shared between passes except the HTTP client.
pub struct CatalogRenderer {
    resolver: AssetResolver,
    options: RenderOptions,
    geometry: PageGeometry,
}

impl CatalogRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let resolver = AssetResolver::new(options.image_timeout);
        CatalogRenderer {
            resolver,
            options,
            geometry: PageGeometry::default(),
        }
    }

    /// Swaps the byte-fetch transport (tests, storefront-side caches).
    pub fn with_fetcher(options: RenderOptions, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let resolver = AssetResolver::with_fetcher(fetcher, options.image_timeout);
        CatalogRenderer {
            resolver,
            options,
            geometry: PageGeometry::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Renders one catalog into a complete paginated document.
    pub async fn render(
        &self,
        profile: &BusinessProfile,
        items: &[CatalogItem],
        category_order: &[String],
        theme: ThemeDescriptor,
    ) -> Result<ComposedDocument, EngineError> {
        validate_input(profile, items)?;
        let renderer = renderer_for(theme);
        info!(theme = %theme, items = items.len(), "starting catalog render");

        let groups = assemble(items, category_order, &self.options.uncategorized_label);

        let logo = if renderer.uses_images() {
            self.resolver.resolve(profile.logo.as_ref()).await
        } else {
            ResolvedImage::Placeholder(PlaceholderReason::NoImage)
        };

        let mut placeholder_count = 0usize;
        let sections: Vec<SectionSlot> = if renderer.uses_images() {
            let flat: Vec<&CatalogItem> = groups.iter().flat_map(|g| g.items.iter()).collect();
            let images: Vec<ResolvedImage> = stream::iter(
                flat.iter()
                    .map(|item| self.resolver.resolve_primary(&item.images)),
            )
            .buffered(self.options.resolver_concurrency.max(1))
            .collect()
            .await;

            for (item, image) in flat.iter().zip(images.iter()) {
                if !item.images.is_empty() && image.is_placeholder() {
                    placeholder_count += 1;
                }
            }

            let mut images = images.into_iter();
            groups
                .into_iter()
                .map(|group| SectionSlot {
                    label: group.label,
                    items: group
                        .items
                        .into_iter()
                        .map(|item| ItemSlot {
                            item,
                            image: images.next().expect("one resolved image per item"),
                        })
                        .collect(),
                })
                .collect()
        } else {
            groups
                .into_iter()
                .map(|group| SectionSlot {
                    label: group.label,
                    items: group
                        .items
                        .into_iter()
                        .map(|item| ItemSlot {
                            item,
                            image: ResolvedImage::Placeholder(PlaceholderReason::NoImage),
                        })
                        .collect(),
                })
                .collect()
        };

        if renderer.uses_images() && profile.logo.is_some() && logo.is_placeholder() {
            placeholder_count += 1;
        }
        if placeholder_count > 0 {
            warn!(placeholder_count, "images fell back to placeholders");
        }

        let input = ComposeInput {
            profile: profile.clone(),
            sections,
            logo,
            theme,
            geometry: self.geometry,
            currency_symbol: self.options.currency_symbol.clone(),
            generated_on: Utc::now().date_naive(),
            placeholder_count,
        };

        let doc = tokio::task::spawn_blocking(move || compose(input))
            .await
            .map_err(|err| EngineError::LayoutTask(format!("composition task failed: {err}")))?;

        info!(
            pages = doc.page_count(),
            items = doc.summary().items_drawn,
            "catalog render complete"
        );
        Ok(doc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
