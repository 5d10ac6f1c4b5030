//! The column/page flow cursor — the only mutable state in a render pass.
//!
//! A cursor walks one page at a time, column 0 then column 1, with the
//! vertical offset growing monotonically until a break resets it. The cardinal
//! rule: a write that would exceed the usable column height triggers the
//! column or page transition *before* the write, never after, so no drawn
//! element ever crosses the bottom content bound.
//!
//! Callers reserve in two steps when units must stay glued (a category header
//! and its first item): `ensure` checks the combined height and takes the
//! break without committing anything, then the individual `reserve` calls
//! land in the fresh column.

use crate::layout::geometry::PageGeometry;

/// Height bookkeeping tolerance for accumulated float error.
const EPSILON: f32 = 0.01;

/// Which transition a reserve forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// Moved from column 0 to column 1 on the same page.
    Column,
    /// Appended a new page and reset to column 0.
    Page,
}

/// A committed slot: where the reserved element goes, in absolute top-down
/// page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub column: u8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    /// Top of the column area, below the running page header.
    content_top: f32,
    /// Full height of one column.
    usable_height: f32,
    page: usize,
    column: u8,
    offset: f32,
}

impl LayoutCursor {
    /// `header_height`/`footer_height` are the per-page bands the theme draws
    /// outside the column flow; columns occupy what remains.
    pub fn new(geometry: PageGeometry, header_height: f32, footer_height: f32) -> Self {
        debug_assert!(header_height >= 0.0 && footer_height >= 0.0);
        let content_top = geometry.margin + header_height;
        let usable_height =
            geometry.page_height - content_top - geometry.margin - footer_height;
        debug_assert!(
            usable_height > 0.0,
            "geometry leaves no room for content: usable_height={usable_height}"
        );
        LayoutCursor {
            geometry,
            content_top,
            usable_height,
            page: 0,
            column: 0,
            offset: 0.0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn content_top(&self) -> f32 {
        self.content_top
    }

    pub fn usable_height(&self) -> f32 {
        self.usable_height
    }

    pub fn remaining(&self) -> f32 {
        (self.usable_height - self.offset).max(0.0)
    }

    pub fn at_column_top(&self) -> bool {
        self.offset == 0.0
    }

    pub fn fits(&self, height: f32) -> bool {
        self.offset + height <= self.usable_height + EPSILON
    }

    /// Peek variant: takes the column/page transition now if `height` would
    /// not fit, without committing any of it. A unit taller than a whole
    /// column is left at the column top so pagination always terminates.
    pub fn ensure(&mut self, height: f32) -> Option<BreakKind> {
        debug_assert!(height > 0.0, "non-positive ensure height: {height}");
        if self.fits(height) || self.at_column_top() {
            return None;
        }
        Some(self.advance())
    }

    /// Commits `height` at the current position, breaking first if needed.
    /// Returns where the element landed and whether a break was taken.
    pub fn reserve(&mut self, height: f32) -> (Placement, Option<BreakKind>) {
        debug_assert!(height > 0.0, "non-positive reserve height: {height}");
        debug_assert!(
            height <= self.usable_height + EPSILON,
            "element height {height} exceeds column height {}",
            self.usable_height
        );
        let did_break = self.ensure(height);
        let placement = Placement {
            page: self.page,
            column: self.column,
            x: self.geometry.column_x(self.column),
            y: self.content_top + self.offset,
            width: self.geometry.column_width(),
        };
        self.offset += height;
        (placement, did_break)
    }

    fn advance(&mut self) -> BreakKind {
        self.offset = 0.0;
        if self.column == 0 {
            self.column = 1;
            BreakKind::Column
        } else {
            self.column = 0;
            self.page += 1;
            BreakKind::Page
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cursor(usable: f32) -> LayoutCursor {
        // margin 10, no header/footer bands → usable = page_height - 20
        let geometry = PageGeometry {
            page_width: 300.0,
            page_height: usable + 20.0,
            margin: 10.0,
            column_gap: 10.0,
        };
        LayoutCursor::new(geometry, 0.0, 0.0)
    }

    #[test]
    fn test_reserve_advances_offset_without_break() {
        let mut cursor = make_cursor(100.0);
        let (placement, brk) = cursor.reserve(30.0);
        assert!(brk.is_none());
        assert_eq!(placement.page, 0);
        assert_eq!(placement.column, 0);
        assert_eq!(placement.y, cursor.content_top());
        assert_eq!(cursor.offset(), 30.0);
    }

    #[test]
    fn test_overflow_breaks_to_column_one() {
        let mut cursor = make_cursor(100.0);
        cursor.reserve(80.0);
        let (placement, brk) = cursor.reserve(30.0);
        assert_eq!(brk, Some(BreakKind::Column));
        assert_eq!(placement.column, 1);
        assert_eq!(placement.y, cursor.content_top());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn test_overflow_in_column_one_breaks_to_new_page() {
        let mut cursor = make_cursor(100.0);
        cursor.reserve(80.0); // col 0
        cursor.reserve(30.0); // col break → col 1
        cursor.reserve(60.0); // col 1 now at 90
        let (placement, brk) = cursor.reserve(30.0);
        assert_eq!(brk, Some(BreakKind::Page));
        assert_eq!(placement.page, 1);
        assert_eq!(placement.column, 0);
    }

    #[test]
    fn test_exact_fit_takes_no_break() {
        let mut cursor = make_cursor(100.0);
        cursor.reserve(70.0);
        let (_, brk) = cursor.reserve(30.0);
        assert!(brk.is_none(), "exact fill must not break");
        assert!(cursor.remaining() <= EPSILON);
    }

    #[test]
    fn test_ensure_is_non_committing() {
        let mut cursor = make_cursor(100.0);
        cursor.reserve(80.0);
        let brk = cursor.ensure(50.0);
        assert_eq!(brk, Some(BreakKind::Column));
        // Break taken, but nothing reserved.
        assert_eq!(cursor.offset(), 0.0);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn test_ensure_noop_when_it_fits() {
        let mut cursor = make_cursor(100.0);
        cursor.reserve(40.0);
        assert!(cursor.ensure(50.0).is_none());
        assert_eq!(cursor.offset(), 40.0);
    }

    #[test]
    fn test_ensure_noop_at_column_top_even_when_too_tall() {
        let mut cursor = make_cursor(100.0);
        // Combined glue height taller than the column, checked at a fresh
        // column top: stay put, do not spin through break after break.
        assert!(cursor.ensure(500.0).is_none());
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_offset_never_exceeds_usable_height() {
        let mut cursor = make_cursor(90.0);
        for step in [20.0_f32, 35.0, 15.0, 40.0, 25.0, 30.0, 20.0, 45.0, 10.0] {
            let (placement, _) = cursor.reserve(step);
            let bottom = placement.y + step;
            let column_bottom = cursor.content_top() + cursor.usable_height();
            assert!(
                bottom <= column_bottom + EPSILON,
                "element bottom {bottom} crossed column bottom {column_bottom}"
            );
            assert!(cursor.offset() <= cursor.usable_height() + EPSILON);
        }
    }

    #[test]
    fn test_column_one_placement_is_right_of_column_zero() {
        let mut cursor = make_cursor(50.0);
        let (left, _) = cursor.reserve(40.0);
        let (right, brk) = cursor.reserve(40.0);
        assert_eq!(brk, Some(BreakKind::Column));
        assert!(right.x > left.x);
        assert_eq!(left.width, right.width);
    }

    #[test]
    #[should_panic]
    fn test_zero_height_reserve_is_a_contract_violation() {
        let mut cursor = make_cursor(100.0);
        let _ = cursor.reserve(0.0);
    }
}
