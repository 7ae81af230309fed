//! Admin Dashboard

use rust_decimal::Decimal;
use serde::Serialize;

use crate::admin::{CategoryRecord, ProductRecord};

/// Products with this many units or fewer are flagged as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock badge shown next to each product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockLevel {
    /// More than [`LOW_STOCK_THRESHOLD`] units
    Healthy,

    /// [`LOW_STOCK_THRESHOLD`] units or fewer
    Low,
}

impl StockLevel {
    /// Level for a stock count.
    #[must_use]
    pub fn of(stock: u32) -> Self {
        if stock > LOW_STOCK_THRESHOLD {
            StockLevel::Healthy
        } else {
            StockLevel::Low
        }
    }
}

/// Summary cards on the dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of products
    pub product_count: usize,

    /// Number of categories
    pub category_count: usize,

    /// Units across all products
    pub total_stock: u64,

    /// Products at or below [`LOW_STOCK_THRESHOLD`]
    pub low_stock_count: usize,

    /// Sum of `price * stock`
    pub inventory_value: Decimal,
}

impl DashboardStats {
    /// Compute the dashboard figures.
    pub fn compute(products: &[ProductRecord], categories: &[CategoryRecord]) -> Self {
        Self {
            product_count: products.len(),
            category_count: categories.len(),
            total_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
            low_stock_count: products
                .iter()
                .filter(|p| StockLevel::of(p.stock) == StockLevel::Low)
                .count(),
            inventory_value: products
                .iter()
                .map(|p| p.price.saturating_mul(Decimal::from(p.stock)))
                .fold(Decimal::ZERO, Decimal::saturating_add),
        }
    }
}
