//! Elegant theme — serif faces, hairline rules instead of boxes, generous
//! padding, gold accents. Low stock reads as a "Limited availability" note.

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

const TEXT: Color = Color::rgb(0.15, 0.14, 0.13);
const MUTED: Color = Color::rgb(0.45, 0.44, 0.42);
const GOLD: Color = Color::rgb(0.62, 0.51, 0.28);
const HAIRLINE: Color = Color::rgb(0.80, 0.78, 0.74);

const PAD: f32 = 10.0;
const IMAGE_SLOT: f32 = 40.0;
const IMAGE_GUTTER: f32 = 10.0;
const HEADER_BASE: f32 = 72.0;
const HEADER_LOGO_EXTRA: f32 = 30.0;
const CATEGORY_HEIGHT: f32 = 26.0;

const NAME_ADVANCE: f32 = 14.0;
const DESC_ADVANCE: f32 = 10.5;
const META_ADVANCE: f32 = 9.5;
const STOCK_ADVANCE: f32 = 10.5;

fn desc_spec() -> FontSpec {
    FontSpec::new(FontFamily::TimesRoman, 8.5)
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
    let meta_line = match (item.sku.as_deref(), item.subcategory.as_deref()) {
        (None, None) => None,
        (sku, sub) => {
            let mut parts = Vec::new();
            if let Some(sub) = sub {
                parts.push(sub.to_uppercase());
            }
            if let Some(sku) = sku {
                parts.push(sku.to_uppercase());
            }
            Some(parts.join("  "))
        }
    };

    let mut text_height = PAD + NAME_ADVANCE + desc_lines.len() as f32 * DESC_ADVANCE;
    if meta_line.is_some() {
        text_height += META_ADVANCE;
    }
    text_height += STOCK_ADVANCE + PAD;

    let height = text_height.max(2.0 * PAD + IMAGE_SLOT);
    ItemLayout {
        text_width,
        desc_lines,
        meta_line,
        height,
    }
}

pub struct ElegantTheme;

impl ThemeRenderer for ElegantTheme {
    fn descriptor(&self) -> ThemeDescriptor {
        ThemeDescriptor::Elegant
    }

    fn page_header_height(&self, profile: &BusinessProfile) -> f32 {
        if profile.logo.is_some() {
            HEADER_BASE + HEADER_LOGO_EXTRA
        } else {
            HEADER_BASE
        }
    }

    fn page_footer_height(&self) -> f32 {
        28.0
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
        logo: &ResolvedImage,
    ) -> f32 {
        let x = geometry.margin;
        let width = geometry.content_width();
        let mut y = geometry.margin;

        // Logo slot is reserved from the profile alone so the band height
        // never depends on whether the fetch succeeded.
        if profile.logo.is_some() {
            let slot = HEADER_LOGO_EXTRA - 6.0;
            let slot_x = x + (width - slot) / 2.0;
            match logo {
                ResolvedImage::Decoded(image) => {
                    let (ix, iy, iw, ih) =
                        fit_rect(image.width, image.height, slot_x, y, slot, slot);
                    page.push(DrawOp::Image {
                        x: ix,
                        y: iy,
                        width: iw,
                        height: ih,
                        image: image.clone(),
                    });
                }
                ResolvedImage::Placeholder(_) => {
                    page.push(DrawOp::Rect {
                        x: slot_x,
                        y,
                        width: slot,
                        height: slot,
                        fill: None,
                        stroke: Some((HAIRLINE, 0.5)),
                    });
                }
            }
            y += HEADER_LOGO_EXTRA;
        }

        let name_spec = FontSpec::new(FontFamily::TimesRoman, 22.0);
        let name = truncate_to_width(&profile.name, &name_spec, width);
        let name_w = measure_width(&name, &name_spec);
        push_text(
            page,
            x + (width - name_w) / 2.0,
            y + 24.0,
            name,
            FontFamily::TimesRoman,
            22.0,
            TEXT,
        );

        // Short centered gold rule.
        let rule_w = 120.0_f32.min(width);
        page.push(DrawOp::Line {
            x1: x + (width - rule_w) / 2.0,
            y1: y + 34.0,
            x2: x + (width + rule_w) / 2.0,
            y2: y + 34.0,
            color: GOLD,
            thickness: 0.8,
        });

        if let Some(site) = profile.website.as_deref() {
            let site_spec = FontSpec::new(FontFamily::TimesRoman, 8.0);
            let site = truncate_to_width(&site.to_uppercase(), &site_spec, width);
            let site_w = measure_width(&site, &site_spec);
            push_text(
                page,
                x + (width - site_w) / 2.0,
                y + 48.0,
                site,
                FontFamily::TimesRoman,
                8.0,
                MUTED,
            );
        }

        self.page_header_height(profile)
    }

    fn draw_category_header(
        &self,
        page: &mut PageOps,
        slot: &Placement,
        label: &str,
        is_continuation: bool,
    ) -> f32 {
        let spec = FontSpec::new(FontFamily::TimesRoman, 11.0);
        let text = truncate_to_width(
            &header_label(label, is_continuation).to_uppercase(),
            &spec,
            slot.width - 40.0,
        );
        let text_w = measure_width(&text, &spec);
        let center = slot.x + slot.width / 2.0;
        let mid_y = slot.y + 14.0;

        // Hairlines flanking the label.
        for (x1, x2) in [
            (slot.x, center - text_w / 2.0 - 8.0),
            (center + text_w / 2.0 + 8.0, slot.x + slot.width),
        ] {
            if x2 > x1 {
                page.push(DrawOp::Line {
                    x1,
                    y1: mid_y - 3.0,
                    x2,
                    y2: mid_y - 3.0,
                    color: HAIRLINE,
                    thickness: 0.5,
                });
            }
        }

        push_text(
            page,
            center - text_w / 2.0,
            mid_y,
            text,
            FontFamily::TimesRoman,
            11.0,
            GOLD,
        );
        CATEGORY_HEIGHT
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

        // Image slot on the right.
        let slot_x = slot.x + slot.width - PAD - IMAGE_SLOT;
        match image {
            ResolvedImage::Decoded(decoded) => {
                let (ix, iy, iw, ih) = fit_rect(
                    decoded.width,
                    decoded.height,
                    slot_x,
                    slot.y + PAD,
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
                    y: slot.y + PAD,
                    width: IMAGE_SLOT,
                    height: IMAGE_SLOT,
                    fill: None,
                    stroke: Some((HAIRLINE, 0.5)),
                });
            }
        }

        let price = format_price(ctx.currency_symbol, item.unit_price);
        let price_spec = FontSpec::new(FontFamily::TimesBold, 10.0);
        let price_w = measure_width(&price, &price_spec);
        let name_spec = FontSpec::new(FontFamily::TimesRoman, 11.0);
        let name_budget = layout.text_width - price_w - 10.0;
        push_text(
            page,
            left,
            row_top + 10.0,
            truncate_to_width(&item.name, &name_spec, name_budget.max(0.0)),
            FontFamily::TimesRoman,
            11.0,
            TEXT,
        );
        push_text(
            page,
            left + layout.text_width - price_w,
            row_top + 10.0,
            price,
            FontFamily::TimesBold,
            10.0,
            GOLD,
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
                MUTED,
            );
            row_top += DESC_ADVANCE;
        }

        if let Some(meta) = &layout.meta_line {
            let meta_spec = FontSpec::new(FontFamily::TimesRoman, 7.0);
            push_text(
                page,
                left,
                row_top + 7.0,
                truncate_to_width(meta, &meta_spec, layout.text_width),
                FontFamily::TimesRoman,
                7.0,
                MUTED,
            );
            row_top += META_ADVANCE;
        }

        let stock_text = if item.is_low_stock() {
            format!("Limited availability, {} remaining", item.stock)
        } else {
            format!("Available: {}", item.stock)
        };
        let stock_color = if item.is_low_stock() { GOLD } else { MUTED };
        push_text(
            page,
            left,
            row_top + 8.0,
            stock_text,
            FontFamily::TimesRoman,
            8.0,
            stock_color,
        );

        page.push(DrawOp::Line {
            x1: slot.x + PAD,
            y1: slot.y + layout.height - 1.0,
            x2: slot.x + slot.width - PAD,
            y2: slot.y + layout.height - 1.0,
            color: HAIRLINE,
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
            x1: x + width / 4.0,
            y1: band_top + 5.0,
            x2: x + 3.0 * width / 4.0,
            y2: band_top + 5.0,
            color: HAIRLINE,
            thickness: 0.5,
        });

        let spec = FontSpec::new(FontFamily::TimesRoman, 7.5);
        let text = format!(
            "{} | Page {} of {} | {}",
            profile.name,
            page_number,
            total_pages,
            generated_on.format("%Y-%m-%d")
        );
        let text = truncate_to_width(&text, &spec, width);
        let text_w = measure_width(&text, &spec);
        push_text(
            page,
            x + (width - text_w) / 2.0,
            band_top + 18.0,
            text,
            FontFamily::TimesRoman,
            7.5,
            MUTED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resolver::PlaceholderReason;
    use crate::models::catalog::ImageRef;
    use uuid::Uuid;

    fn make_profile(with_logo: bool) -> BusinessProfile {
        BusinessProfile {
            name: "Maison Lumière".to_string(),
            logo: with_logo.then(|| ImageRef::Url("https://example.com/logo.png".to_string())),
            phone: None,
            email: None,
            address: None,
            website: Some("maison.example".to_string()),
        }
    }

    #[test]
    fn test_header_height_reserves_logo_slot_from_profile() {
        let theme = ElegantTheme;
        assert_eq!(theme.page_header_height(&make_profile(false)), HEADER_BASE);
        assert_eq!(
            theme.page_header_height(&make_profile(true)),
            HEADER_BASE + HEADER_LOGO_EXTRA
        );
    }

    #[test]
    fn test_unresolved_logo_draws_empty_slot_with_same_height() {
        let theme = ElegantTheme;
        let mut page = PageOps::default();
        let used = theme.draw_page_header(
            &mut page,
            &PageGeometry::default(),
            &make_profile(true),
            &ResolvedImage::Placeholder(PlaceholderReason::Timeout),
        );
        assert_eq!(used, HEADER_BASE + HEADER_LOGO_EXTRA);
        assert!(page
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { stroke: Some(_), .. })));
    }

    #[test]
    fn test_low_stock_note_present() {
        let theme = ElegantTheme;
        let item = CatalogItem {
            id: Uuid::new_v4(),
            name: "Linen Napkin Set".to_string(),
            description: "Stonewashed linen, set of four".to_string(),
            unit_price: 36.0,
            stock: 1,
            low_stock_alert: 2,
            category: "Table".to_string(),
            subcategory: None,
            sku: None,
            images: vec![],
        };
        let mut page = PageOps::default();
        theme.draw_item(
            &mut page,
            &Placement {
                page: 0,
                column: 0,
                x: 36.0,
                y: 130.0,
                width: 261.0,
            },
            &item,
            &ResolvedImage::Placeholder(PlaceholderReason::NoImage),
            &ThemeContext {
                currency_symbol: "$",
            },
        );
        assert!(page.text_runs().any(|t| t.contains("Limited availability")));
    }
}
