// Two-column flow layout: geometry, the cursor state machine, and the
// pagination pass that drives theme draw calls.

pub mod cursor;
pub(crate) mod engine;
pub mod geometry;

pub use cursor::{BreakKind, LayoutCursor, Placement};
pub use geometry::PageGeometry;
