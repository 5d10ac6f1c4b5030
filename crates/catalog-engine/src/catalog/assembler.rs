//! Catalog assembly — turns raw item records into the ordered category
//! groups the pagination engine walks.
//!
//! Pure and total: no I/O, no error cases. A category with zero matching
//! items is simply absent from the output, never emitted as an empty section.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::catalog::CatalogItem;

/// A category label plus its items, sorted for rendering. Derived per render
/// pass and discarded afterwards; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub label: String,
    pub items: Vec<CatalogItem>,
}

/// Groups `items` by exact category-name match against `category_order`,
/// preserving the declared sequence. Items matching no declared category are
/// collected into one synthetic trailing group labeled `uncategorized_label`.
///
/// Within every group items are sorted by name (case-insensitive), ties
/// broken by id so the ordering is deterministic.
pub fn assemble(
    items: &[CatalogItem],
    category_order: &[String],
    uncategorized_label: &str,
) -> Vec<CategoryGroup> {
    let mut by_category: HashMap<&str, Vec<CatalogItem>> = HashMap::new();
    for item in items {
        by_category
            .entry(item.category.as_str())
            .or_default()
            .push(item.clone());
    }

    let mut groups = Vec::new();
    for name in category_order {
        // remove() so a duplicated declared name yields an empty second
        // occurrence, which is dropped like any other empty group
        if let Some(mut matched) = by_category.remove(name.as_str()) {
            sort_items(&mut matched);
            groups.push(CategoryGroup {
                label: name.clone(),
                items: matched,
            });
        }
    }

    let mut leftover: Vec<CatalogItem> = by_category.into_values().flatten().collect();
    if !leftover.is_empty() {
        sort_items(&mut leftover);
        groups.push(CategoryGroup {
            label: uncategorized_label.to_string(),
            items: leftover,
        });
    }

    groups
}

fn sort_items(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
