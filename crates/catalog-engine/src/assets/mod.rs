pub mod fetcher;
pub mod resolver;

pub use fetcher::{HttpFetcher, ImageFetcher};
pub use resolver::{AssetResolver, DecodedImage, PlaceholderReason, ResolvedImage};
