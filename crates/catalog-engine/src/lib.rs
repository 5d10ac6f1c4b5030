//! Catalog document composition engine.
//!
//! Takes a business profile, a flat list of catalog items plus their declared
//! category order, and a theme, and produces a print-ready, fully paginated
//! two-column document. The surrounding storefront owns all data retrieval,
//! auth, and delivery; the only network touch inside the engine is the
//! read-only image fetch, and that is total — a slow or broken image degrades
//! to a typed placeholder, never to an error.
//!
//! ```no_run
//! use catalog_engine::{CatalogRenderer, RenderOptions, ThemeDescriptor};
//! # async fn run(profile: catalog_engine::BusinessProfile,
//! #              items: Vec<catalog_engine::CatalogItem>) -> anyhow::Result<()> {
//! let renderer = CatalogRenderer::new(RenderOptions::default());
//! let order = vec!["Kitchen".to_string(), "Garden".to_string()];
//! let doc = renderer
//!     .render(&profile, &items, &order, ThemeDescriptor::Modern)
//!     .await?;
//! let pdf = doc.render_to_bytes()?;
//! # let _ = pdf;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod render;
pub mod text;
pub mod themes;
pub mod writer;

pub use assets::{AssetResolver, HttpFetcher, ImageFetcher, PlaceholderReason, ResolvedImage};
pub use catalog::{assemble, CategoryGroup};
pub use config::RenderOptions;
pub use errors::EngineError;
pub use layout::PageGeometry;
pub use models::{BusinessProfile, CatalogItem, ImageRef, ThemeDescriptor};
pub use render::CatalogRenderer;
pub use themes::{renderer_for, ThemeRenderer};
pub use writer::{ComposedDocument, DrawOp, PreviewHandle, RenderSummary};
