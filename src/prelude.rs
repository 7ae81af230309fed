//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{
        AdminDialog, AdminError, AdminPanel, AdminStore, CategoryForm, CategoryRecord,
        DashboardStats, LoggingAdminStore, ProductForm, ProductRecord,
    },
    cart::{
        CartError, CartItem, CartLedger, CartLine,
        summary::{CartSummary, SummaryError},
    },
    catalog::{Catalog, CatalogError},
    categories::Category,
    discounts::{Discount, DiscountError},
    filters::{CategoryFilter, FilterConfig, FilterError, filter_products},
    fixtures::{Fixture, FixtureError},
    listing::{CatalogView, RenderError, write_listing},
    pricing::PricingError,
    products::{Product, ProductCategory, ProductId, ProductKey, StockStatus},
    sorting::{SortKey, sort_products},
    state::StorefrontState,
};
