use thiserror::Error;

/// Engine-level error type.
///
/// Asset problems never appear here — image resolution is total and always
/// yields a drawable placeholder. A render fails only on structurally invalid
/// input (checked once, before any layout work) or on a backend fault while
/// serializing the finished document.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid business profile: {0}")]
    InvalidProfile(String),

    #[error("layout task failed: {0}")]
    LayoutTask(String),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] anyhow::Error),
}
