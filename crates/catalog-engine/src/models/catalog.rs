//! Input data model for one render pass.
//!
//! Everything here is owned by the caller and read-only to the engine. The
//! surrounding storefront materializes these records from its document store
//! before invoking the renderer; no data-layer I/O happens inside the engine.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an item or logo image.
///
/// `Url` is fetched over HTTP with a bounded deadline; `Bytes` is a
/// pre-fetched blob (e.g. already cached by the storefront) that skips the
/// network and goes straight to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    Url(String),
    Bytes(Bytes),
}

/// A single sellable item as stored by the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Unit price. Validated finite and ≥ 0 at the engine boundary.
    pub unit_price: f64,
    pub stock: u32,
    /// Per-item low-stock threshold. Items with `stock <= low_stock_alert`
    /// are flagged by every theme.
    pub low_stock_alert: u32,
    pub category: String,
    pub subcategory: Option<String>,
    pub sku: Option<String>,
    /// Ordered image references; the first that resolves is the one drawn.
    pub images: Vec<ImageRef>,
}

impl CatalogItem {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_alert
    }
}

/// Shop identity used for running headers and footers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub logo: Option<ImageRef>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
}

impl BusinessProfile {
    /// Contact fields joined with " | " for the footer line, in a fixed
    /// order. Returns `None` when no contact field is set.
    pub fn contact_line(&self) -> Option<String> {
        let fields: Vec<&str> = [&self.phone, &self.email, &self.address, &self.website]
            .iter()
            .filter_map(|f| f.as_deref())
            .filter(|s| !s.trim().is_empty())
            .collect();
        if fields.is_empty() {
            None
        } else {
            Some(fields.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(name: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "A fine product".to_string(),
            unit_price: 9.99,
            stock: 10,
            low_stock_alert: 5,
            category: category.to_string(),
            subcategory: None,
            sku: None,
            images: vec![],
        }
    }

    #[test]
    fn test_low_stock_uses_item_threshold() {
        let mut item = make_item("Widget", "Tools");
        item.stock = 3;
        item.low_stock_alert = 3;
        assert!(item.is_low_stock());

        item.low_stock_alert = 2;
        assert!(!item.is_low_stock());
    }

    #[test]
    fn test_contact_line_joins_in_order() {
        let profile = BusinessProfile {
            name: "Corner Shop".to_string(),
            logo: None,
            phone: Some("+1 555 0100".to_string()),
            email: Some("hello@corner.shop".to_string()),
            address: None,
            website: Some("corner.shop".to_string()),
        };
        assert_eq!(
            profile.contact_line().as_deref(),
            Some("+1 555 0100 | hello@corner.shop | corner.shop")
        );
    }

    #[test]
    fn test_contact_line_empty_when_no_fields() {
        let profile = BusinessProfile {
            name: "Corner Shop".to_string(),
            logo: None,
            phone: None,
            email: Some("   ".to_string()),
            address: None,
            website: None,
        };
        assert!(profile.contact_line().is_none());
    }
}
