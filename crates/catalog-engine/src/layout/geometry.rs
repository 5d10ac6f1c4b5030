//! Page geometry for the two-column flow.
//!
//! All distances are in points. The default is US letter with half-inch
//! margins; callers (and tests) may supply any geometry that leaves room for
//! two positive-width columns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,
    /// Horizontal gap between the two columns.
    pub column_gap: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // US letter, 0.5" margins, 0.25" gutter.
        PageGeometry {
            page_width: 612.0,
            page_height: 792.0,
            margin: 36.0,
            column_gap: 18.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn column_width(&self) -> f32 {
        (self.content_width() - self.column_gap) / 2.0
    }

    /// Left edge of column 0 or 1.
    pub fn column_x(&self, column: u8) -> f32 {
        debug_assert!(column <= 1, "two-column layout, got column {column}");
        self.margin + column as f32 * (self.column_width() + self.column_gap)
    }
}
