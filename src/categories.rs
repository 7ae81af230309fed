//! Categories

use serde::{Deserialize, Serialize};

use crate::products::ProductCategory;

/// Category shown in the storefront navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier, matching a [`ProductCategory`] slug for storefront categories
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Number of products, as recorded by whoever authored the category.
    ///
    /// This is not recomputed from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

impl Category {
    /// The product category this category lists, if its id is a known slug.
    pub fn kind(&self) -> Option<ProductCategory> {
        self.id.parse().ok()
    }

    /// Link target for the catalog filtered by this category.
    #[must_use]
    pub fn catalog_href(&self) -> String {
        format!("/productos?categoria={}", self.id)
    }
}
