//! The pagination pass — walks assembled sections through the cursor and
//! drives theme draw calls, recording primitives page by page.
//!
//! Flow rules:
//! - A category header never sits orphaned at the bottom of a column: before
//!   drawing it the engine checks the header *plus the first item* and takes
//!   the break first when the pair would overflow.
//! - When a section's items split across a column or page break, the header
//!   is re-drawn at the top of the new column with the continuation flag set.
//! - A page break re-draws the running page header before any content.
//! - Footers are stamped in a second pass once the total page count is known.
//!
//! Each section and item is visited exactly once, so the pass is
//! O(items + sections) and needs no page-count bound to terminate.

use chrono::NaiveDate;
use tracing::debug;

use crate::assets::resolver::ResolvedImage;
use crate::layout::cursor::{BreakKind, LayoutCursor};
use crate::layout::geometry::PageGeometry;
use crate::models::catalog::{BusinessProfile, CatalogItem};
use crate::models::theme::ThemeDescriptor;
use crate::themes::{renderer_for, ThemeContext, ThemeRenderer};
use crate::writer::{ComposedDocument, PageOps, RenderSummary};

/// Reserved-versus-drawn height slack before a theme is considered broken.
const HEIGHT_TOLERANCE: f32 = 0.5;

/// One item paired with its resolved image, in final draw order.
#[derive(Debug, Clone)]
pub(crate) struct ItemSlot {
    pub item: CatalogItem,
    pub image: ResolvedImage,
}

/// One category's worth of slots.
#[derive(Debug, Clone)]
pub(crate) struct SectionSlot {
    pub label: String,
    pub items: Vec<ItemSlot>,
}

/// Owned input for one composition pass; everything the blocking layout step
/// needs, with all network work already behind it.
#[derive(Debug, Clone)]
pub(crate) struct ComposeInput {
    pub profile: BusinessProfile,
    pub sections: Vec<SectionSlot>,
    pub logo: ResolvedImage,
    pub theme: ThemeDescriptor,
    pub geometry: PageGeometry,
    pub currency_symbol: String,
    pub generated_on: NaiveDate,
    pub placeholder_count: usize,
}

/// Pure, synchronous composition over fully materialized inputs. Always
/// yields at least one page.
pub(crate) fn compose(input: ComposeInput) -> ComposedDocument {
    let theme = renderer_for(input.theme);
    let ctx = ThemeContext {
        currency_symbol: &input.currency_symbol,
    };

    let header_h = theme.page_header_height(&input.profile);
    let footer_h = theme.page_footer_height();
    let mut cursor = LayoutCursor::new(input.geometry, header_h, footer_h);

    let mut pages = vec![PageOps::default()];
    let used = theme.draw_page_header(&mut pages[0], &input.geometry, &input.profile, &input.logo);
    debug_assert!(
        (used - header_h).abs() < HEIGHT_TOLERANCE,
        "{} page header drew {used}, declared {header_h}",
        input.theme
    );

    let column_width = input.geometry.column_width();
    let mut items_drawn = 0usize;
    let mut continuations = 0usize;

    for section in &input.sections {
        if section.items.is_empty() {
            continue;
        }
        let head_h = theme.category_header_height(column_width, &section.label);

        for (index, slot) in section.items.iter().enumerate() {
            let item_h = theme.item_height(column_width, &slot.item);
            let needs_header = index == 0;

            // Break-before-write. Mid-section items check the glued pair too,
            // because landing in a fresh column means a continuation header
            // goes in above them.
            let did_break = if needs_header || !cursor.fits(item_h) {
                cursor.ensure(head_h + item_h)
            } else {
                None
            };
            if did_break == Some(BreakKind::Page) {
                start_new_page(
                    &mut pages,
                    theme,
                    &input.geometry,
                    &input.profile,
                    &input.logo,
                    header_h,
                );
            }

            if needs_header || did_break.is_some() {
                let is_continuation = !needs_header;
                let (placement, head_break) = cursor.reserve(head_h);
                debug_assert!(head_break.is_none());
                let used = theme.draw_category_header(
                    &mut pages[placement.page],
                    &placement,
                    &section.label,
                    is_continuation,
                );
                debug_assert!(
                    (used - head_h).abs() < HEIGHT_TOLERANCE,
                    "{} category header drew {used}, declared {head_h}",
                    input.theme
                );
                if is_continuation {
                    continuations += 1;
                }
            }

            let (placement, item_break) = cursor.reserve(item_h);
            debug_assert!(
                item_break.is_none(),
                "item broke after its height was ensured"
            );
            let used = theme.draw_item(
                &mut pages[placement.page],
                &placement,
                &slot.item,
                &slot.image,
                &ctx,
            );
            debug_assert!(
                (used - item_h).abs() < HEIGHT_TOLERANCE,
                "{} item '{}' drew {used}, declared {item_h}",
                input.theme,
                slot.item.name
            );
            items_drawn += 1;
        }
    }

    let total_pages = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        theme.draw_page_footer(
            page,
            &input.geometry,
            &input.profile,
            index + 1,
            total_pages,
            input.generated_on,
        );
    }

    debug!(
        theme = %input.theme,
        pages = total_pages,
        items = items_drawn,
        continuations,
        "composed catalog document"
    );

    ComposedDocument::new(
        input.geometry,
        pages,
        RenderSummary {
            page_count: total_pages,
            items_drawn,
            placeholder_count: input.placeholder_count,
        },
    )
}

fn start_new_page(
    pages: &mut Vec<PageOps>,
    theme: &dyn ThemeRenderer,
    geometry: &PageGeometry,
    profile: &BusinessProfile,
    logo: &ResolvedImage,
    header_h: f32,
) {
    pages.push(PageOps::default());
    let page = pages.last_mut().expect("page just pushed");
    let used = theme.draw_page_header(page, geometry, profile, logo);
    debug_assert!(
        (used - header_h).abs() < HEIGHT_TOLERANCE,
        "page header height changed between pages"
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
