//! Document writer — the draw-primitive seam between layout and the concrete
//! page-description backend.
//!
//! Themes emit `DrawOp`s into per-page buffers; nothing touches a PDF library
//! until `render_to_bytes`. Recording first keeps composition pure and
//! synchronous, lets the footer pass run once the final page count is known,
//! and makes layout decisions assertable in tests without parsing PDF output.
//! Any backend that can replay rectangles, lines, text runs, and raster
//! images onto physical pages can substitute for the bundled one.

pub mod pdf;

use serde::Serialize;

use crate::assets::resolver::DecodedImage;
use crate::errors::EngineError;
use crate::layout::geometry::PageGeometry;
use crate::text::font_metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Primitives
// ────────────────────────────────────────────────────────────────────────────

/// RGB color, each channel 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

/// One low-level drawing primitive. Coordinates are in points with the origin
/// at the top-left of the page and y growing downward; the backend flips into
/// its own coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        thickness: f32,
    },
    Text {
        x: f32,
        /// Baseline position, top-down.
        y: f32,
        content: String,
        family: FontFamily,
        size_pt: f32,
        color: Color,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: DecodedImage,
    },
}

/// Recorded ops for one physical page, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOps {
    pub ops: Vec<DrawOp>,
}

impl PageOps {
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All text runs on the page, in draw order. Test and preview helper.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composed document
// ────────────────────────────────────────────────────────────────────────────

/// How many images degraded to placeholders and why. Returned to the caller
/// so the storefront can log degradation; the document itself is complete
/// either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSummary {
    pub page_count: usize,
    pub items_drawn: usize,
    /// Images that had a reference but resolved to a placeholder
    /// (fetch failures and timeouts; absent images are not counted).
    pub placeholder_count: usize,
}

/// The finished, fully paginated document: recorded pages plus the geometry
/// they were laid out against.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    pub(crate) geometry: PageGeometry,
    pub(crate) pages: Vec<PageOps>,
    pub(crate) summary: RenderSummary,
}

impl ComposedDocument {
    pub(crate) fn new(geometry: PageGeometry, pages: Vec<PageOps>, summary: RenderSummary) -> Self {
        ComposedDocument {
            geometry,
            pages,
            summary,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn summary(&self) -> &RenderSummary {
        &self.summary
    }

    /// Serializes the document through the bundled PDF backend.
    pub fn render_to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let bytes = pdf::write_pdf(self)?;
        Ok(bytes)
    }

    /// Cheap, replayable view of the recorded pages for on-screen preview.
    /// The storefront replays the ops onto its own canvas before the user
    /// commits to a downloadable artifact.
    pub fn preview_handle(&self) -> PreviewHandle<'_> {
        PreviewHandle { doc: self }
    }
}

/// Borrowing view over a composed document's pages.
#[derive(Debug, Clone, Copy)]
pub struct PreviewHandle<'a> {
    doc: &'a ComposedDocument,
}

impl<'a> PreviewHandle<'a> {
    pub fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.doc.geometry.page_width, self.doc.geometry.page_height)
    }

    pub fn page_ops(&self, index: usize) -> Option<&'a [DrawOp]> {
        self.doc.pages.get(index).map(|p| p.ops.as_slice())
    }
}
