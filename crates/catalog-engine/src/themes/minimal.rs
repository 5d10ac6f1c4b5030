//! Minimal theme — Helvetica, tight rows, hairline dividers, no image slots.
//! The imageless variant: the renderer skips asset resolution entirely.

use chrono::NaiveDate;

use crate::assets::resolver::ResolvedImage;
use crate::layout::cursor::Placement;
use crate::layout::geometry::PageGeometry;
use crate::models::catalog::{BusinessProfile, CatalogItem};
use crate::models::theme::ThemeDescriptor;
use crate::text::font_metrics::{measure_width, FontFamily, FontSpec};
use crate::text::measure::{truncate_to_width, wrap_to_width};
use crate::themes::{format_price, header_label, push_text, ThemeContext, ThemeRenderer};
use crate::writer::{Color, DrawOp, PageOps};

const TEXT: Color = Color::rgb(0.10, 0.10, 0.10);
const MUTED: Color = Color::rgb(0.50, 0.50, 0.50);
const LINE: Color = Color::rgb(0.85, 0.85, 0.85);
const ALERT: Color = Color::rgb(0.75, 0.20, 0.15);

const PAD: f32 = 5.0;
const HEADER_HEIGHT: f32 = 44.0;
const CATEGORY_HEIGHT: f32 = 22.0;

const NAME_ADVANCE: f32 = 13.0;
const DESC_ADVANCE: f32 = 10.0;
const META_ADVANCE: f32 = 9.0;

fn desc_spec() -> FontSpec {
    FontSpec::new(FontFamily::Helvetica, 8.0)
}

struct ItemLayout {
    text_width: f32,
    desc_lines: Vec<String>,
    meta_line: String,
    height: f32,
}

fn item_layout(width: f32, item: &CatalogItem) -> ItemLayout {
    let text_width = width - 2.0 * PAD;
    let desc_lines = wrap_to_width(&item.description, &desc_spec(), text_width, 2);

    let mut parts = Vec::new();
    if let Some(sku) = item.sku.as_deref() {
        parts.push(sku.to_string());
    }
    if let Some(sub) = item.subcategory.as_deref() {
        parts.push(sub.to_string());
    }
    parts.push(format!("Stock: {}", item.stock));
    let meta_line = parts.join(" / ");

    let height =
        PAD + NAME_ADVANCE + desc_lines.len() as f32 * DESC_ADVANCE + META_ADVANCE + PAD;
    ItemLayout {
        text_width,
        desc_lines,
        meta_line,
        height,
    }
}

pub struct MinimalTheme;

impl ThemeRenderer for MinimalTheme {
    fn descriptor(&self) -> ThemeDescriptor {
        ThemeDescriptor::Minimal
    }

    fn uses_images(&self) -> bool {
        false
    }

    fn page_header_height(&self, _profile: &BusinessProfile) -> f32 {
        HEADER_HEIGHT
    }

    fn page_footer_height(&self) -> f32 {
        18.0
    }

    fn category_header_height(&self, _width: f32, _label: &str) -> f32 {
        CATEGORY_HEIGHT
    }

    fn item_height(&self, width: f32, item: &CatalogItem) -> f32 {
        item_layout(width, item).height
    }

    fn draw_page_header(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        profile: &BusinessProfile,
        _logo: &ResolvedImage,
    ) -> f32 {
        let x = geometry.margin;
        let y = geometry.margin;
        let width = geometry.content_width();

        let name_spec = FontSpec::new(FontFamily::HelveticaBold, 15.0);
        push_text(
            page,
            x,
            y + 16.0,
            truncate_to_width(&profile.name, &name_spec, width),
            FontFamily::HelveticaBold,
            15.0,
            TEXT,
        );

        if let Some(contact) = profile.contact_line() {
            let contact_spec = FontSpec::new(FontFamily::Helvetica, 7.0);
            let contact = truncate_to_width(&contact, &contact_spec, width / 2.0);
            let contact_w = measure_width(&contact, &contact_spec);
            push_text(
                page,
                x + width - contact_w,
                y + 16.0,
                contact,
                FontFamily::Helvetica,
                7.0,
                MUTED,
            );
        }

        page.push(DrawOp::Line {
            x1: x,
            y1: y + 26.0,
            x2: x + width,
            y2: y + 26.0,
            color: TEXT,
            thickness: 1.0,
        });

        HEADER_HEIGHT
    }

    fn draw_category_header(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        label: &str,
        is_continuation: bool,
    ) -> f32 {
        let spec = FontSpec::new(FontFamily::HelveticaBold, 9.5);
        let text = truncate_to_width(
            &header_label(label, is_continuation).to_uppercase(),
            &spec,
            slot.width,
        );
        push_text(
            page,
            slot.x,
            slot.y + 13.0,
            text,
            FontFamily::HelveticaBold,
            9.5,
            TEXT,
        );
        page.push(DrawOp::Line {
            x1: slot.x,
            y1: slot.y + 17.0,
            x2: slot.x + slot.width,
            y2: slot.y + 17.0,
            color: LINE,
            thickness: 0.5,
        });
        CATEGORY_HEIGHT
    }

    fn draw_item(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        item: &CatalogItem,
        _image: &ResolvedImage,
        ctx: &ThemeContext<'_>,
    ) -> f32 {
        let layout = item_layout(slot.width, item);
        let left = slot.x + PAD;
        let mut row_top = slot.y + PAD;

        let price = format_price(ctx.currency_symbol, item.unit_price);
        let price_spec = FontSpec::new(FontFamily::HelveticaBold, 9.5);
        let price_w = measure_width(&price, &price_spec);
        let name_spec = FontSpec::new(FontFamily::HelveticaBold, 9.5);
        let name_budget = layout.text_width - price_w - 6.0;
        push_text(
            page,
            left,
            row_top + 9.0,
            truncate_to_width(&item.name, &name_spec, name_budget.max(0.0)),
            FontFamily::HelveticaBold,
            9.5,
            TEXT,
        );
        push_text(
            page,
            left + layout.text_width - price_w,
            row_top + 9.0,
            price,
            FontFamily::HelveticaBold,
            9.5,
            TEXT,
        );
        row_top += NAME_ADVANCE;

        for line in &layout.desc_lines {
            push_text(
                page,
                left,
                row_top + 7.5,
                line.clone(),
                FontFamily::Helvetica,
                8.0,
                MUTED,
            );
            row_top += DESC_ADVANCE;
        }

        let meta_spec = FontSpec::new(FontFamily::Helvetica, 7.0);
        let meta = truncate_to_width(&layout.meta_line, &meta_spec, layout.text_width);
        push_text(
            page,
            left,
            row_top + 7.0,
            meta.clone(),
            FontFamily::Helvetica,
            7.0,
            MUTED,
        );
        if item.is_low_stock() {
            let meta_w = measure_width(&meta, &meta_spec);
            push_text(
                page,
                left + meta_w + 6.0,
                row_top + 7.0,
                "* low stock".to_string(),
                FontFamily::HelveticaBold,
                7.0,
                ALERT,
            );
        }

        page.push(DrawOp::Line {
            x1: slot.x,
            y1: slot.y + layout.height - 0.5,
            x2: slot.x + slot.width,
            y2: slot.y + layout.height - 0.5,
            color: LINE,
            thickness: 0.5,
        });

        layout.height
    }

    fn draw_page_footer(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        _profile: &BusinessProfile,
        page_number: usize,
        total_pages: usize,
        generated_on: NaiveDate,
    ) {
        let x = geometry.margin;
        let width = geometry.content_width();
        let band_top = geometry.page_height - geometry.margin - self.page_footer_height();
        let spec = FontSpec::new(FontFamily::Helvetica, 7.0);

        let center_text = format!("{page_number} / {total_pages}");
        let center_w = measure_width(&center_text, &spec);
        push_text(
            page,
            x + (width - center_w) / 2.0,
            band_top + 12.0,
            center_text,
            FontFamily::Helvetica,
            7.0,
            MUTED,
        );

        push_text(
            page,
            x,
            band_top + 12.0,
            format!("Generated on {}", generated_on.format("%Y-%m-%d")),
            FontFamily::Helvetica,
            7.0,
            MUTED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resolver::PlaceholderReason;
    use uuid::Uuid;

    fn make_item() -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: "Plain Notebook".to_string(),
            description: "Dot grid, 120 pages".to_string(),
            unit_price: 8.0,
            stock: 40,
            low_stock_alert: 5,
            category: "Paper".to_string(),
            subcategory: None,
            sku: Some("NB-120".to_string()),
            images: vec![],
        }
    }

    #[test]
    fn test_no_image_ops_ever() {
        let theme = MinimalTheme;
        let mut page = PageOps::default();
        theme.draw_item(
            &mut page,
            &Placement {
                page: 0,
                column: 0,
                x: 36.0,
                y: 100.0,
                width: 261.0,
            },
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        assert!(!page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn test_meta_line_carries_sku_and_stock() {
        let theme = MinimalTheme;
        let mut page = PageOps::default();
        theme.draw_item(
            &mut page,
            &Placement {
                page: 0,
                column: 0,
                x: 36.0,
                y: 100.0,
                width: 261.0,
            },
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        assert!(page
            .text_runs()
            .any(|t| t.contains("NB-120") && t.contains("Stock: 40")));
    }

    #[test]
    fn test_item_height_independent_of_stock_level() {
        // The low-stock marker sits inline; flagged rows keep the same height
        // so pagination cannot shift with stock levels.
        let theme = MinimalTheme;
        let healthy = make_item();
        let mut low = make_item();
        low.stock = 1;
        assert_eq!(
            theme.item_height(261.0, &healthy),
            theme.item_height(261.0, &low)
        );
    }
}
