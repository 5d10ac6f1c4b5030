pub mod font_metrics;
pub mod measure;

pub use font_metrics::{measure_width, FontFamily, FontSpec};
pub use measure::{truncate_to_width, wrap_to_width, ELLIPSIS};
