//! One-shot boundary validation.
//!
//! Runs before any layout work; a structurally invalid input fails the whole
//! render with a single typed error. Nothing downstream of this module needs
//! a failure branch for bad input data.

use crate::errors::EngineError;
use crate::models::catalog::{BusinessProfile, CatalogItem};

/// Validates the full render input. Returns the first problem found.
pub fn validate_input(
    profile: &BusinessProfile,
    items: &[CatalogItem],
) -> Result<(), EngineError> {
    if profile.name.trim().is_empty() {
        return Err(EngineError::InvalidProfile(
            "business name must not be blank".to_string(),
        ));
    }

    for item in items {
        if item.name.trim().is_empty() {
            return Err(EngineError::InvalidCatalog(format!(
                "item {} has a blank name",
                item.id
            )));
        }
        if !item.unit_price.is_finite() {
            return Err(EngineError::InvalidCatalog(format!(
                "item '{}' has a non-finite price",
                item.name
            )));
        }
        if item.unit_price < 0.0 {
            return Err(EngineError::InvalidCatalog(format!(
                "item '{}' has a negative price ({})",
                item.name, item.unit_price
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::ImageRef;
    use uuid::Uuid;

    fn make_profile() -> BusinessProfile {
        BusinessProfile {
            name: "Corner Shop".to_string(),
            logo: None,
            phone: None,
            email: None,
            address: None,
            website: None,
        }
    }

    fn make_item(name: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            unit_price: price,
            stock: 1,
            low_stock_alert: 0,
            category: "General".to_string(),
            subcategory: None,
            sku: None,
            images: vec![ImageRef::Url("https://example.com/a.png".to_string())],
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let items = vec![make_item("Widget", 0.0), make_item("Gadget", 12.5)];
        assert!(validate_input(&make_profile(), &items).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let items = vec![make_item("Widget", -0.01)];
        let err = validate_input(&make_profile(), &items).unwrap_err();
        assert!(matches!(err, EngineError::InvalidCatalog(_)));
    }

    #[test]
    fn test_nan_price_rejected() {
        let items = vec![make_item("Widget", f64::NAN)];
        assert!(validate_input(&make_profile(), &items).is_err());
    }

    #[test]
    fn test_blank_item_name_rejected() {
        let items = vec![make_item("   ", 1.0)];
        assert!(validate_input(&make_profile(), &items).is_err());
    }

    #[test]
    fn test_blank_business_name_rejected() {
        let mut profile = make_profile();
        profile.name = " ".to_string();
        let err = validate_input(&profile, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile(_)));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        assert!(validate_input(&make_profile(), &[]).is_ok());
    }
}
