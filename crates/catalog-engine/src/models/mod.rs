pub mod catalog;
pub mod theme;
pub mod validate;

pub use catalog::{BusinessProfile, CatalogItem, ImageRef};
pub use theme::ThemeDescriptor;
