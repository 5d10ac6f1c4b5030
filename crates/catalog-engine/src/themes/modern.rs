//! Modern theme — Helvetica, a filled accent band for headers, image slot on
//! the right of each row, badge-style low-stock marker.

use chrono::NaiveDate;

use crate::assets::resolver::ResolvedImage;
use crate::layout::cursor::Placement;
use crate::layout::geometry::PageGeometry;
use crate::models::catalog::{BusinessProfile, CatalogItem};
use crate::models::theme::ThemeDescriptor;
use crate::text::font_metrics::{measure_width, FontFamily, FontSpec};
use crate::text::measure::{truncate_to_width, wrap_to_width};
use crate::themes::{fit_rect, format_price, header_label, push_text, ThemeContext, ThemeRenderer};
use crate::writer::{Color, DrawOp, PageOps};

const ACCENT: Color = Color::rgb(0.11, 0.42, 0.80);
const ACCENT_LIGHT: Color = Color::rgb(0.88, 0.93, 0.99);
const TEXT: Color = Color::rgb(0.13, 0.13, 0.15);
const MUTED: Color = Color::rgb(0.45, 0.47, 0.50);
const ALERT: Color = Color::rgb(0.85, 0.23, 0.16);
const DIVIDER: Color = Color::rgb(0.87, 0.89, 0.92);

const PAD: f32 = 8.0;
const IMAGE_SLOT: f32 = 48.0;
const IMAGE_GUTTER: f32 = 8.0;
const HEADER_BAND: f32 = 54.0;
const HEADER_GAP: f32 = 10.0;
const CATEGORY_BAND: f32 = 24.0;
const CATEGORY_GAP: f32 = 6.0;

const NAME_ADVANCE: f32 = 13.0;
const DESC_ADVANCE: f32 = 10.5;
const META_ADVANCE: f32 = 9.5;
const PRICE_ROW: f32 = 14.0;

fn name_spec() -> FontSpec {
    FontSpec::new(FontFamily::HelveticaBold, 10.5)
}

fn desc_spec() -> FontSpec {
    FontSpec::new(FontFamily::Helvetica, 8.5)
}

fn meta_spec() -> FontSpec {
    FontSpec::new(FontFamily::Helvetica, 7.5)
}

struct ItemLayout {
    text_width: f32,
    desc_lines: Vec<String>,
    meta_line: Option<String>,
    height: f32,
}

fn item_layout(width: f32, item: &CatalogItem) -> ItemLayout {
    let text_width = width - 2.0 * PAD - IMAGE_SLOT - IMAGE_GUTTER;
    let desc_lines = wrap_to_width(&item.description, &desc_spec(), text_width, 2);
    let meta_line = meta_line(item);

    let mut text_height = PAD + NAME_ADVANCE + desc_lines.len() as f32 * DESC_ADVANCE;
    if meta_line.is_some() {
        text_height += META_ADVANCE;
    }
    text_height += PRICE_ROW + PAD;

    let height = text_height.max(2.0 * PAD + IMAGE_SLOT);
    ItemLayout {
        text_width,
        desc_lines,
        meta_line,
        height,
    }
}

fn meta_line(item: &CatalogItem) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(sku) = item.sku.as_deref() {
        parts.push(format!("SKU {sku}"));
    }
    if let Some(sub) = item.subcategory.as_deref() {
        parts.push(sub.to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}

pub struct ModernTheme;

impl ThemeRenderer for ModernTheme {
    fn descriptor(&self) -> ThemeDescriptor {
        ThemeDescriptor::Modern
    }

    fn page_header_height(&self, _profile: &BusinessProfile) -> f32 {
        HEADER_BAND + HEADER_GAP
    }

    fn page_footer_height(&self) -> f32 {
        24.0
    }

    fn category_header_height(&self, _width: f32, _label: &str) -> f32 {
        CATEGORY_BAND + CATEGORY_GAP
    }

    fn item_height(&self, width: f32, item: &CatalogItem) -> f32 {
        item_layout(width, item).height
    }

    fn draw_page_header(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        profile: &BusinessProfile,
        logo: &ResolvedImage,
    ) -> f32 {
        let x = geometry.margin;
        let y = geometry.margin;
        let width = geometry.content_width();

        page.push(DrawOp::Rect {
            x,
            y,
            width,
            height: HEADER_BAND,
            fill: Some(ACCENT),
            stroke: None,
        });

        let logo_slot = HEADER_BAND - 8.0;
        let mut text_width = width - 24.0;
        if let ResolvedImage::Decoded(image) = logo {
            let (ix, iy, iw, ih) = fit_rect(
                image.width,
                image.height,
                x + width - logo_slot - 4.0,
                y + 4.0,
                logo_slot,
                logo_slot,
            );
            page.push(DrawOp::Image {
                x: ix,
                y: iy,
                width: iw,
                height: ih,
                image: image.clone(),
            });
            text_width -= logo_slot + 8.0;
        }

        let name_spec = FontSpec::new(FontFamily::HelveticaBold, 18.0);
        let name = truncate_to_width(&profile.name, &name_spec, text_width);
        push_text(
            page,
            x + 12.0,
            y + 26.0,
            name,
            FontFamily::HelveticaBold,
            18.0,
            Color::WHITE,
        );

        if let Some(site) = profile.website.as_deref() {
            let site_spec = FontSpec::new(FontFamily::Helvetica, 8.5);
            push_text(
                page,
                x + 12.0,
                y + 42.0,
                truncate_to_width(site, &site_spec, text_width),
                FontFamily::Helvetica,
                8.5,
                ACCENT_LIGHT,
            );
        }

        HEADER_BAND + HEADER_GAP
    }

    fn draw_category_header(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        label: &str,
        is_continuation: bool,
    ) -> f32 {
        page.push(DrawOp::Rect {
            x: slot.x,
            y: slot.y,
            width: slot.width,
            height: CATEGORY_BAND,
            fill: Some(ACCENT_LIGHT),
            stroke: None,
        });
        let spec = FontSpec::new(FontFamily::HelveticaBold, 11.5);
        let text = truncate_to_width(
            &header_label(label, is_continuation),
            &spec,
            slot.width - 16.0,
        );
        push_text(
            page,
            slot.x + 8.0,
            slot.y + 16.0,
            text,
            FontFamily::HelveticaBold,
            11.5,
            ACCENT,
        );
        CATEGORY_BAND + CATEGORY_GAP
    }

    fn draw_item(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        item: &CatalogItem,
        image: &ResolvedImage,
        ctx: &ThemeContext<'_>,
    ) -> f32 {
        let layout = item_layout(slot.width, item);
        let left = slot.x + PAD;
        let mut row_top = slot.y + PAD;

        // Image slot on the right; reserved whether or not the image resolved
        // so row shapes stay stable.
        let slot_x = slot.x + slot.width - PAD - IMAGE_SLOT;
        let slot_y = slot.y + PAD;
        match image {
            ResolvedImage::Decoded(decoded) => {
                let (ix, iy, iw, ih) = fit_rect(
                    decoded.width,
                    decoded.height,
                    slot_x,
                    slot_y,
                    IMAGE_SLOT,
                    IMAGE_SLOT,
                );
                page.push(DrawOp::Image {
                    x: ix,
                    y: iy,
                    width: iw,
                    height: ih,
                    image: decoded.clone(),
                });
            }
            ResolvedImage::Placeholder(_) => {
                page.push(DrawOp::Rect {
                    x: slot_x,
                    y: slot_y,
                    width: IMAGE_SLOT,
                    height: IMAGE_SLOT,
                    fill: Some(ACCENT_LIGHT),
                    stroke: None,
                });
                push_text(
                    page,
                    slot_x + 8.0,
                    slot_y + IMAGE_SLOT / 2.0 + 2.0,
                    "no image".to_string(),
                    FontFamily::Helvetica,
                    6.5,
                    MUTED,
                );
            }
        }

        push_text(
            page,
            left,
            row_top + 9.0,
            truncate_to_width(&item.name, &name_spec(), layout.text_width),
            FontFamily::HelveticaBold,
            10.5,
            TEXT,
        );
        row_top += NAME_ADVANCE;

        for line in &layout.desc_lines {
            push_text(
                page,
                left,
                row_top + 8.0,
                line.clone(),
                FontFamily::Helvetica,
                8.5,
                MUTED,
            );
            row_top += DESC_ADVANCE;
        }

        if let Some(meta) = &layout.meta_line {
            push_text(
                page,
                left,
                row_top + 7.5,
                truncate_to_width(meta, &meta_spec(), layout.text_width),
                FontFamily::Helvetica,
                7.5,
                MUTED,
            );
            row_top += META_ADVANCE;
        }

        // Price left, stock right within the text area.
        let price = format_price(ctx.currency_symbol, item.unit_price);
        push_text(
            page,
            left,
            row_top + 10.0,
            price,
            FontFamily::HelveticaBold,
            10.5,
            ACCENT,
        );

        let stock_text = format!("Stock: {}", item.stock);
        let stock_spec = FontSpec::new(FontFamily::Helvetica, 7.5);
        let stock_w = measure_width(&stock_text, &stock_spec);
        let stock_x = left + layout.text_width - stock_w;
        push_text(
            page,
            stock_x,
            row_top + 10.0,
            stock_text,
            FontFamily::Helvetica,
            7.5,
            MUTED,
        );

        if item.is_low_stock() {
            let badge_spec = FontSpec::new(FontFamily::HelveticaBold, 6.5);
            let badge_w = measure_width("LOW", &badge_spec) + 8.0;
            let badge_x = stock_x - badge_w - 6.0;
            page.push(DrawOp::Rect {
                x: badge_x,
                y: row_top + 2.0,
                width: badge_w,
                height: 10.0,
                fill: Some(ALERT),
                stroke: None,
            });
            push_text(
                page,
                badge_x + 4.0,
                row_top + 9.5,
                "LOW".to_string(),
                FontFamily::HelveticaBold,
                6.5,
                Color::WHITE,
            );
        }

        page.push(DrawOp::Line {
            x1: slot.x,
            y1: slot.y + layout.height - 0.5,
            x2: slot.x + slot.width,
            y2: slot.y + layout.height - 0.5,
            color: DIVIDER,
            thickness: 0.5,
        });

        layout.height
    }

    fn draw_page_footer(
        &self,
        page: &mut PageOps,
        geometry: &PageGeometry,
        profile: &BusinessProfile,
        page_number: usize,
        total_pages: usize,
        generated_on: NaiveDate,
    ) {
        let x = geometry.margin;
        let width = geometry.content_width();
        let band_top = geometry.page_height - geometry.margin - self.page_footer_height();

        page.push(DrawOp::Line {
            x1: x,
            y1: band_top + 4.0,
            x2: x + width,
            y2: band_top + 4.0,
            color: ACCENT,
            thickness: 1.0,
        });

        let spec = FontSpec::new(FontFamily::Helvetica, 7.5);
        let left_text = profile
            .contact_line()
            .unwrap_or_else(|| profile.name.clone());
        let right_text = format!(
            "Generated on {} | Page {} of {}",
            generated_on.format("%Y-%m-%d"),
            page_number,
            total_pages
        );
        let right_w = measure_width(&right_text, &spec);
        let left_budget = width - right_w - 12.0;

        push_text(
            page,
            x,
            band_top + 16.0,
            truncate_to_width(&left_text, &spec, left_budget.max(0.0)),
            FontFamily::Helvetica,
            7.5,
            MUTED,
        );
        push_text(
            page,
            x + width - right_w,
            band_top + 16.0,
            right_text,
            FontFamily::Helvetica,
            7.5,
            MUTED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resolver::{DecodedImage, PlaceholderReason};
    use uuid::Uuid;

    fn make_item() -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: "Stoneware Mug".to_string(),
            description: "Hand thrown mug with a matte glaze".to_string(),
            unit_price: 24.5,
            stock: 12,
            low_stock_alert: 3,
            category: "Kitchen".to_string(),
            subcategory: None,
            sku: Some("MUG-001".to_string()),
            images: vec![],
        }
    }

    fn make_slot() -> Placement {
        Placement {
            page: 0,
            column: 0,
            x: 36.0,
            y: 110.0,
            width: 261.0,
        }
    }

    #[test]
    fn test_item_height_at_least_image_slot() {
        let theme = ModernTheme;
        let mut item = make_item();
        item.description = String::new();
        item.sku = None;
        assert!(theme.item_height(261.0, &item) >= 2.0 * PAD + IMAGE_SLOT);
    }

    #[test]
    fn test_item_height_grows_with_description() {
        let theme = ModernTheme;
        let mut short = make_item();
        short.description = "Tiny".to_string();
        let mut long = make_item();
        long.description =
            "A very detailed description that wraps across multiple lines of the narrow \
             two column layout used by the catalog"
                .to_string();
        assert!(theme.item_height(261.0, &long) >= theme.item_height(261.0, &short));
    }

    #[test]
    fn test_placeholder_draws_slot_box() {
        let theme = ModernTheme;
        let mut page = PageOps::default();
        theme.draw_item(
            &mut page,
            &make_slot(),
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::Timeout),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        let has_slot_rect = page.ops.iter().any(|op| {
            matches!(op, DrawOp::Rect { width, height, .. }
                if (*width - IMAGE_SLOT).abs() < 1e-3 && (*height - IMAGE_SLOT).abs() < 1e-3)
        });
        assert!(has_slot_rect, "placeholder box missing");
    }

    #[test]
    fn test_decoded_image_emits_image_op() {
        let theme = ModernTheme;
        let mut page = PageOps::default();
        let image = ResolvedImage::Decoded(DecodedImage {
            width: 4,
            height: 4,
            rgb: vec![0; 48],
        });
        theme.draw_item(
            &mut page,
            &make_slot(),
            &make_item(),
            &image,
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        assert!(page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn test_price_uses_canonical_format() {
        let theme = ModernTheme;
        let mut page = PageOps::default();
        theme.draw_item(
            &mut page,
            &make_slot(),
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "€",
            },
        );
        assert!(page.text_runs().any(|t| t == "€24.50"));
    }

    #[test]
    fn test_footer_names_page_and_total() {
        let theme = ModernTheme;
        let mut page = PageOps::default();
        let profile = BusinessProfile {
            name: "Corner Shop".to_string(),
            logo: None,
            phone: None,
            email: None,
            address: None,
            website: None,
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        theme.draw_page_footer(&mut page, &PageGeometry::default(), &profile, 2, 5, date);
        assert!(page
            .text_runs()
            .any(|t| t.contains("Page 2 of 5") && t.contains("2025-03-14")));
    }
}
