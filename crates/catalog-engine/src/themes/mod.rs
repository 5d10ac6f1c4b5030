//! Theme renderers — four visual strategies over one geometric contract.
//!
//! The pagination engine never branches on which theme is active. It asks the
//! trait for heights, reserves them, and trusts each draw call to consume
//! exactly the height it declared (checked with debug assertions — a mismatch
//! is a bug in a theme, not bad input).
//!
//! Shared rules across every theme:
//! - Prices print as `{symbol}{amount:.2}`, no grouping separators.
//! - An item with `stock <= low_stock_alert` gets a visible low-stock marker;
//!   the per-item threshold is authoritative.
//! - Image slots are reserved whether or not the image resolved; a
//!   placeholder box keeps row heights stable.

pub mod classic;
pub mod elegant;
pub mod minimal;
pub mod modern;

use chrono::NaiveDate;

use crate::assets::resolver::ResolvedImage;
use crate::layout::cursor::Placement;
use crate::layout::geometry::PageGeometry;
use crate::models::catalog::{BusinessProfile, CatalogItem};
use crate::models::theme::ThemeDescriptor;
use crate::writer::PageOps;

pub use classic::ClassicTheme;
pub use elegant::ElegantTheme;
pub use minimal::MinimalTheme;
pub use modern::ModernTheme;

/// Per-render values the themes need while drawing but that are not part of
/// any single item.
#[derive(Debug, Clone, Copy)]
pub struct ThemeContext<'a> {
    pub currency_symbol: &'a str,
}

/// The geometric + paint contract every theme implements.
///
/// Height methods are pure and must return strictly positive values; the
/// matching draw method must consume exactly that height. `width` is the
/// column width the element will be drawn into.
pub trait ThemeRenderer: Send + Sync {
    fn descriptor(&self) -> ThemeDescriptor;

    /// Whether item rows include an image slot. When false the renderer
    /// skips asset resolution entirely.
    fn uses_images(&self) -> bool {
        true
    }

    fn page_header_height(&self, profile: &BusinessProfile) -> f32;
    fn page_footer_height(&self) -> f32;
    fn category_header_height(&self, width: f32, label: &str) -> f32;
    fn item_height(&self, width: f32, item: &CatalogItem) -> f32;

    /// Draws the running header band. Returns the height consumed, which must
    /// equal `page_header_height`.
    fn draw_page_header(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        profile: &BusinessProfile,
        logo: &ResolvedImage,
    ) -> f32;

    fn draw_category_header(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        label: &str,
        is_continuation: bool,
    ) -> f32;

    fn draw_item(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        item: &CatalogItem,
        image: &ResolvedImage,
        ctx: &ThemeContext<'_>,
    ) -> f32;

    /// Footers are drawn in a second pass once the final page count is known.
    #[allow(clippy::too_many_arguments)]
    fn draw_page_footer(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        profile: &BusinessProfile,
        page_number: usize,
        total_pages: usize,
        generated_on: NaiveDate,
    );
}

static MODERN: ModernTheme = ModernTheme;
static CLASSIC: ClassicTheme = ClassicTheme;
static ELEGANT: ElegantTheme = ElegantTheme;
static MINIMAL: MinimalTheme = MinimalTheme;

/// Returns the strategy for a theme descriptor. Renderers are stateless.
pub fn renderer_for(theme: ThemeDescriptor) -> &'static dyn ThemeRenderer {
    match theme {
        ThemeDescriptor::Modern => &MODERN,
        ThemeDescriptor::Classic => &CLASSIC,
        ThemeDescriptor::Elegant => &ELEGANT,
        ThemeDescriptor::Minimal => &MINIMAL,
    }
}

/// Canonical price formatting shared by every theme: two fixed decimals, no
/// grouping separators.
pub(crate) fn format_price(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

/// Suffix appended to re-emitted category headers so a split section stays
/// labeled on the new column or page.
pub(crate) const CONTINUATION_SUFFIX: &str = " (continued)";

pub(crate) fn header_label(label: &str, is_continuation: bool) -> String {
    if is_continuation {
        format!("{label}{CONTINUATION_SUFFIX}")
    } else {
        label.to_string()
    }
}

pub(crate) fn push_text(
    page: &mut PageOps,
    x: f32,
    y: f32,
    content: String,
    family: crate::text::font_metrics::FontFamily,
    size_pt: f32,
    color: crate::writer::Color,
) {
    page.push(crate::writer::DrawOp::Text {
        x,
        y,
        content,
        family,
        size_pt,
        color,
    });
}

/// Contain-fit of an image into a slot, centered both ways. Returns
/// `(x, y, width, height)` of the drawn rect.
pub(crate) fn fit_rect(
    image_w: u32,
    image_h: u32,
    slot_x: f32,
    slot_y: f32,
    slot_w: f32,
    slot_h: f32,
) -> (f32, f32, f32, f32) {
    if image_w == 0 || image_h == 0 {
        return (slot_x, slot_y, slot_w, slot_h);
    }
    let image_aspect = image_w as f32 / image_h as f32;
    let slot_aspect = slot_w / slot_h;
    let (w, h) = if image_aspect > slot_aspect {
        (slot_w, slot_w / image_aspect)
    } else {
        (slot_h * image_aspect, slot_h)
    };
    (
        slot_x + (slot_w - w) / 2.0,
        slot_y + (slot_h - h) / 2.0,
        w,
        h,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resolver::{PlaceholderReason, ResolvedImage};
    use crate::layout::cursor::Placement;
    use uuid::Uuid;

    fn make_item(desc: &str) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: "Stoneware Mug".to_string(),
            description: desc.to_string(),
            unit_price: 24.0,
            stock: 12,
            low_stock_alert: 3,
            category: "Kitchen".to_string(),
            subcategory: Some("Drinkware".to_string()),
            sku: Some("MUG-001".to_string()),
            images: vec![],
        }
    }

    fn make_profile() -> BusinessProfile {
        BusinessProfile {
            name: "Corner Shop".to_string(),
            logo: None,
            phone: Some("+1 555 0100".to_string()),
            email: None,
            address: None,
            website: None,
        }
    }

    fn placement(width: f32) -> Placement {
        Placement {
            page: 0,
            column: 0,
            x: 36.0,
            y: 120.0,
            width,
        }
    }

    #[test]
    fn test_format_price_two_decimals_no_grouping() {
        assert_eq!(format_price("$", 0.0), "$0.00");
        assert_eq!(format_price("$", 1234567.5), "$1234567.50");
        assert_eq!(format_price("€", 9.999), "€10.00");
    }

    #[test]
    fn test_header_label_continuation_suffix() {
        assert_eq!(header_label("Kitchen", false), "Kitchen");
        assert_eq!(header_label("Kitchen", true), "Kitchen (continued)");
    }

    #[test]
    fn test_fit_rect_wide_image_clamps_to_slot_width() {
        let (x, y, w, h) = fit_rect(200, 100, 0.0, 0.0, 50.0, 50.0);
        assert!((w - 50.0).abs() < 1e-3);
        assert!((h - 25.0).abs() < 1e-3);
        assert_eq!(x, 0.0);
        assert!((y - 12.5).abs() < 1e-3);
    }

    #[test]
    fn test_fit_rect_tall_image_clamps_to_slot_height() {
        let (_, y, w, h) = fit_rect(100, 200, 0.0, 0.0, 50.0, 50.0);
        assert!((h - 50.0).abs() < 1e-3);
        assert!((w - 25.0).abs() < 1e-3);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_all_themes_report_positive_heights() {
        let item = make_item("A short description of the product");
        let profile = make_profile();
        for descriptor in ThemeDescriptor::ALL {
            let theme = renderer_for(descriptor);
            assert!(theme.page_header_height(&profile) > 0.0, "{descriptor}");
            assert!(theme.page_footer_height() > 0.0, "{descriptor}");
            assert!(theme.category_header_height(261.0, "Kitchen") > 0.0, "{descriptor}");
            assert!(theme.item_height(261.0, &item) > 0.0, "{descriptor}");
        }
    }

    #[test]
    fn test_draw_item_consumes_declared_height_in_every_theme() {
        let item = make_item(
            "Hand thrown stoneware mug with a matte glaze and a generous handle, \
             microwave and dishwasher safe, ships in recycled packaging",
        );
        let image = ResolvedImage::Placeholder(PlaceholderReason::NoImage);
        let ctx = ThemeContext {
            currency_symbol: "$",
        };
        for descriptor in ThemeDescriptor::ALL {
            let theme = renderer_for(descriptor);
            let width = 261.0;
            let declared = theme.item_height(width, &item);
            let mut page = PageOps::default();
            let used = theme.draw_item(&mut page, &placement(width), &item, &image, &ctx);
            assert!(
                (declared - used).abs() < 0.5,
                "{descriptor}: declared {declared}, drew {used}"
            );
            assert!(!page.ops.is_empty());
        }
    }

    #[test]
    fn test_draw_category_header_consumes_declared_height() {
        for descriptor in ThemeDescriptor::ALL {
            let theme = renderer_for(descriptor);
            let width = 261.0;
            let declared = theme.category_header_height(width, "Kitchen");
            let mut page = PageOps::default();
            let used = theme.draw_category_header(&mut page, &placement(width), "Kitchen", false);
            assert!(
                (declared - used).abs() < 0.5,
                "{descriptor}: declared {declared}, drew {used}"
            );
        }
    }

    #[test]
    fn test_every_theme_marks_low_stock() {
        let mut item = make_item("desc");
        item.stock = 2;
        item.low_stock_alert = 3;
        let image = ResolvedImage::Placeholder(PlaceholderReason::NoImage);
        let ctx = ThemeContext {
            currency_symbol: "$",
        };
        for descriptor in ThemeDescriptor::ALL {
            let theme = renderer_for(descriptor);
            let mut flagged = PageOps::default();
            theme.draw_item(&mut flagged, &placement(261.0), &item, &image, &ctx);

            // Same stock count, higher threshold: the only difference left
            // between the two rows is the marker itself.
            let mut healthy_item = item.clone();
            healthy_item.low_stock_alert = 1;
            let mut healthy = PageOps::default();
            theme.draw_item(&mut healthy, &placement(261.0), &healthy_item, &image, &ctx);

            // The flagged row must carry some marker the healthy row lacks:
            // extra ops or different text content.
            let flagged_text: Vec<&str> = flagged.text_runs().collect();
            let healthy_text: Vec<&str> = healthy.text_runs().collect();
            assert!(
                flagged.ops.len() > healthy.ops.len() || flagged_text != healthy_text,
                "{descriptor} draws no visible low-stock marker"
            );
        }
    }

    #[test]
    fn test_continuation_header_text_differs() {
        for descriptor in ThemeDescriptor::ALL {
            let theme = renderer_for(descriptor);
            let mut fresh = PageOps::default();
            theme.draw_category_header(&mut fresh, &placement(261.0), "Kitchen", false);
            let mut continued = PageOps::default();
            theme.draw_category_header(&mut continued, &placement(261.0), "Kitchen", true);
            let continued_text = continued
                .text_runs()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            assert!(
                continued_text.contains("continued"),
                "{descriptor} continuation header not labeled: {continued_text:?}"
            );
        }
    }

    #[test]
    fn test_minimal_is_the_imageless_variant() {
        assert!(!renderer_for(ThemeDescriptor::Minimal).uses_images());
        assert!(renderer_for(ThemeDescriptor::Modern).uses_images());
        assert!(renderer_for(ThemeDescriptor::Classic).uses_images());
        assert!(renderer_for(ThemeDescriptor::Elegant).uses_images());
    }
}
