use std::time::Duration;

/// Per-renderer options.
///
/// The engine takes no environment configuration — everything a render needs
/// arrives through its inputs. These knobs cover the few behaviors the
/// surrounding storefront may want to tune per deployment.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Deadline for a single image fetch+decode attempt.
    pub image_timeout: Duration,
    /// Upper bound on concurrently in-flight image resolutions.
    pub resolver_concurrency: usize,
    /// Currency symbol prefixed to every price. No grouping separators are
    /// ever emitted; amounts always print with two decimal places.
    pub currency_symbol: String,
    /// Label for the synthetic trailing group that collects items whose
    /// category matches no declared category ("Other Products" in the shop
    /// catalog, "Featured Products" on the storefront landing export).
    pub uncategorized_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            image_timeout: Duration::from_secs(3),
            resolver_concurrency: 4,
            currency_symbol: "$".to_string(),
            uncategorized_label: "Other Products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_sane() {
        let opts = RenderOptions::default();
        assert_eq!(opts.image_timeout, Duration::from_secs(3));
        assert!(opts.resolver_concurrency >= 1);
        assert_eq!(opts.currency_symbol, "$");
        assert_eq!(opts.uncategorized_label, "Other Products");
    }
}
