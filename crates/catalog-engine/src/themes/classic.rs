//! Classic theme — Times faces, bordered rows, centered headers, image slot
//! on the left. Low stock is flagged with a spelled-out note after the stock
//! count.

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

const TEXT: Color = Color::rgb(0.10, 0.10, 0.10);
const MUTED: Color = Color::rgb(0.40, 0.38, 0.35);
const BORDER: Color = Color::rgb(0.45, 0.40, 0.35);
const ACCENT: Color = Color::rgb(0.55, 0.12, 0.12);
const CREAM: Color = Color::rgb(0.97, 0.96, 0.93);

const PAD: f32 = 8.0;
const ROW_GAP: f32 = 6.0;
const IMAGE_SLOT: f32 = 44.0;
const IMAGE_GUTTER: f32 = 8.0;
const HEADER_HEIGHT: f32 = 66.0;
const CATEGORY_BOX: f32 = 26.0;
const CATEGORY_GAP: f32 = 6.0;

const NAME_ADVANCE: f32 = 13.0;
const DESC_ADVANCE: f32 = 10.0;
const META_ADVANCE: f32 = 9.0;
const STOCK_ADVANCE: f32 = 11.0;

fn desc_spec() -> FontSpec {
    FontSpec::new(FontFamily::TimesRoman, 8.5)
}

struct ItemLayout {
    text_width: f32,
    desc_lines: Vec<String>,
    meta_line: Option<String>,
    /// Height of the bordered box; the row reserves `box_height + ROW_GAP`.
    box_height: f32,
}

fn item_layout(width: f32, item: &CatalogItem) -> ItemLayout {
    let text_width = width - 2.0 * PAD - IMAGE_SLOT - IMAGE_GUTTER;
    let desc_lines = wrap_to_width(&item.description, &desc_spec(), text_width, 3);
    let meta_line = match (item.sku.as_deref(), item.subcategory.as_deref()) {
        (None, None) => None,
        (sku, sub) => {
            let mut parts = Vec::new();
            if let Some(sku) = sku {
                parts.push(format!("No. {sku}"));
            }
            if let Some(sub) = sub {
                parts.push(sub.to_string());
            }
            Some(parts.join(", "))
        }
    };

    let mut text_height = PAD + NAME_ADVANCE + desc_lines.len() as f32 * DESC_ADVANCE;
    if meta_line.is_some() {
        text_height += META_ADVANCE;
    }
    text_height += STOCK_ADVANCE + PAD;

    let box_height = text_height.max(2.0 * PAD + IMAGE_SLOT);
    ItemLayout {
        text_width,
        desc_lines,
        meta_line,
        box_height,
    }
}

pub struct ClassicTheme;

impl ThemeRenderer for ClassicTheme {
    fn descriptor(&self) -> ThemeDescriptor {
        ThemeDescriptor::Classic
    }

    fn page_header_height(&self, _profile: &BusinessProfile) -> f32 {
        HEADER_HEIGHT
    }

    fn page_footer_height(&self) -> f32 {
        26.0
    }

    fn category_header_height(&self, _width: f32, _label: &str) -> f32 {
        CATEGORY_BOX + CATEGORY_GAP
    }

    fn item_height(&self, width: f32, item: &CatalogItem) -> f32 {
        item_layout(width, item).box_height + ROW_GAP
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

        if let ResolvedImage::Decoded(image) = logo {
            let (ix, iy, iw, ih) =
                fit_rect(image.width, image.height, x, y + 2.0, 40.0, 40.0);
            page.push(DrawOp::Image {
                x: ix,
                y: iy,
                width: iw,
                height: ih,
                image: image.clone(),
            });
        }

        let name_spec = FontSpec::new(FontFamily::TimesBold, 20.0);
        let name = truncate_to_width(&profile.name, &name_spec, width - 100.0);
        let name_w = measure_width(&name, &name_spec);
        push_text(
            page,
            x + (width - name_w) / 2.0,
            y + 22.0,
            name,
            FontFamily::TimesBold,
            20.0,
            TEXT,
        );

        // Double rule under the masthead.
        for (offset, thickness) in [(32.0, 1.2), (35.0, 0.5)] {
            page.push(DrawOp::Line {
                x1: x,
                y1: y + offset,
                x2: x + width,
                y2: y + offset,
                color: BORDER,
                thickness,
            });
        }

        if let Some(contact) = profile.contact_line() {
            let contact_spec = FontSpec::new(FontFamily::TimesRoman, 8.0);
            let contact = truncate_to_width(&contact, &contact_spec, width);
            let contact_w = measure_width(&contact, &contact_spec);
            push_text(
                page,
                x + (width - contact_w) / 2.0,
                y + 48.0,
                contact,
                FontFamily::TimesRoman,
                8.0,
                MUTED,
            );
        }

        HEADER_HEIGHT
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
            height: CATEGORY_BOX,
            fill: Some(CREAM),
            stroke: Some((BORDER, 0.75)),
        });
        let spec = FontSpec::new(FontFamily::TimesBold, 12.0);
        let text = truncate_to_width(
            &header_label(label, is_continuation),
            &spec,
            slot.width - 12.0,
        );
        let text_w = measure_width(&text, &spec);
        push_text(
            page,
            slot.x + (slot.width - text_w) / 2.0,
            slot.y + 17.0,
            text,
            FontFamily::TimesBold,
            12.0,
            TEXT,
        );
        CATEGORY_BOX + CATEGORY_GAP
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

        page.push(DrawOp::Rect {
            x: slot.x,
            y: slot.y,
            width: slot.width,
            height: layout.box_height,
            fill: None,
            stroke: Some((BORDER, 0.75)),
        });

        // Image slot on the left.
        let slot_x = slot.x + PAD;
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
                    fill: Some(CREAM),
                    stroke: Some((BORDER, 0.5)),
                });
            }
        }

        let left = slot_x + IMAGE_SLOT + IMAGE_GUTTER;
        let mut row_top = slot.y + PAD;

        // Name left, price right on the same line, price-list style.
        let price = format_price(ctx.currency_symbol, item.unit_price);
        let price_spec = FontSpec::new(FontFamily::TimesBold, 10.5);
        let price_w = measure_width(&price, &price_spec);
        let name_spec = FontSpec::new(FontFamily::TimesBold, 10.5);
        let name_budget = layout.text_width - price_w - 8.0;
        push_text(
            page,
            left,
            row_top + 9.5,
            truncate_to_width(&item.name, &name_spec, name_budget.max(0.0)),
            FontFamily::TimesBold,
            10.5,
            TEXT,
        );
        push_text(
            page,
            left + layout.text_width - price_w,
            row_top + 9.5,
            price,
            FontFamily::TimesBold,
            10.5,
            ACCENT,
        );
        row_top += NAME_ADVANCE;

        for line in &layout.desc_lines {
            push_text(
                page,
                left,
                row_top + 8.0,
                line.clone(),
                FontFamily::TimesRoman,
                8.5,
                TEXT,
            );
            row_top += DESC_ADVANCE;
        }

        if let Some(meta) = &layout.meta_line {
            let meta_spec = FontSpec::new(FontFamily::TimesRoman, 7.5);
            push_text(
                page,
                left,
                row_top + 7.5,
                truncate_to_width(meta, &meta_spec, layout.text_width),
                FontFamily::TimesRoman,
                7.5,
                MUTED,
            );
            row_top += META_ADVANCE;
        }

        let stock_text = if item.is_low_stock() {
            format!("In stock: {} (low stock!)", item.stock)
        } else {
            format!("In stock: {}", item.stock)
        };
        let stock_color = if item.is_low_stock() { ACCENT } else { MUTED };
        push_text(
            page,
            left,
            row_top + 8.5,
            stock_text,
            FontFamily::TimesRoman,
            8.5,
            stock_color,
        );

        layout.box_height + ROW_GAP
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

        for (offset, thickness) in [(3.0, 0.5), (6.0, 1.2)] {
            page.push(DrawOp::Line {
                x1: x,
                y1: band_top + offset,
                x2: x + width,
                y2: band_top + offset,
                color: BORDER,
                thickness,
            });
        }

        let spec = FontSpec::new(FontFamily::TimesRoman, 8.0);
        let center_text = format!("- Page {page_number} of {total_pages} -");
        let center_w = measure_width(&center_text, &spec);
        push_text(
            page,
            x + (width - center_w) / 2.0,
            band_top + 18.0,
            center_text,
            FontFamily::TimesRoman,
            8.0,
            TEXT,
        );

        let left_text = format!("{} catalog, {}", profile.name, generated_on.format("%Y-%m-%d"));
        push_text(
            page,
            x,
            band_top + 18.0,
            truncate_to_width(&left_text, &spec, (width - center_w) / 2.0 - 8.0),
            FontFamily::TimesRoman,
            8.0,
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
            name: "Brass Candlestick".to_string(),
            description: "Polished brass, weighted base".to_string(),
            unit_price: 48.0,
            stock: 2,
            low_stock_alert: 4,
            category: "Decor".to_string(),
            subcategory: None,
            sku: None,
            images: vec![],
        }
    }

    #[test]
    fn test_low_stock_note_spelled_out() {
        let theme = ClassicTheme;
        let mut page = PageOps::default();
        let slot = Placement {
            page: 0,
            column: 0,
            x: 36.0,
            y: 120.0,
            width: 261.0,
        };
        theme.draw_item(
            &mut page,
            &slot,
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        assert!(page.text_runs().any(|t| t.contains("(low stock!)")));
    }

    #[test]
    fn test_item_row_is_bordered() {
        let theme = ClassicTheme;
        let mut page = PageOps::default();
        let slot = Placement {
            page: 0,
            column: 0,
            x: 36.0,
            y: 120.0,
            width: 261.0,
        };
        let height = theme.draw_item(
            &mut page,
            &slot,
            &make_item(),
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        let boxed = page.ops.iter().any(|op| {
            matches!(op, DrawOp::Rect { stroke: Some(_), fill: None, height: h, .. }
                if (*h - (height - ROW_GAP)).abs() < 1e-3)
        });
        assert!(boxed, "row border rect missing");
    }

    #[test]
    fn test_header_centered_name_fits_content() {
        let theme = ClassicTheme;
        let mut page = PageOps::default();
        let geometry = PageGeometry::default();
        let profile = BusinessProfile {
            name: "The Antiquarian Supply Company of Greater Boston".to_string(),
            logo: None,
            phone: None,
            email: None,
            address: None,
            website: None,
        };
        let used = theme.draw_page_header(
            &mut page,
            &geometry,
            &profile,
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
        );
        assert_eq!(used, HEADER_HEIGHT);
        for op in &page.ops {
            if let DrawOp::Text { x, .. } = op {
                assert!(*x >= geometry.margin - 1e-3);
            }
        }
    }
}
