//! Sorting

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{products::Product, text::collation_key};

/// Error returned when a sort selector value is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sort option: {0}")]
pub struct UnknownSortKey(pub String);

/// Ordering selected on the catalog page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// A to Z
    NameAsc,

    /// Z to A
    NameDesc,

    /// Featured products first
    #[default]
    Featured,
}

impl SortKey {
    /// Every sort option, in selector order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// Selector value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::Featured => "featured",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a new sequence ordered by `key`.
///
/// The input is left untouched and products comparing equal keep their relative order.
pub fn sort_products<'c, 'a>(products: &[&'c Product<'a>], key: SortKey) -> Vec<&'c Product<'a>> {
    match key {
        SortKey::PriceAsc => sorted_by(products, |a, b| a.price.amount().cmp(b.price.amount())),
        SortKey::PriceDesc => sorted_by(products, |a, b| b.price.amount().cmp(a.price.amount())),
        SortKey::NameAsc => sorted_by_name(products, false),
        SortKey::NameDesc => sorted_by_name(products, true),
        SortKey::Featured => sorted_by(products, |a, b| b.featured.cmp(&a.featured)),
    }
}

fn sorted_by<'c, 'a>(
    products: &[&'c Product<'a>],
    compare: impl Fn(&Product<'a>, &Product<'a>) -> Ordering,
) -> Vec<&'c Product<'a>> {
    let mut sorted = products.to_vec();

    // `sort_by` is stable
    sorted.sort_by(|a, b| compare(a, b));

    sorted
}

fn sorted_by_name<'c, 'a>(products: &[&'c Product<'a>], descending: bool) -> Vec<&'c Product<'a>> {
    let mut keyed: Vec<(String, &'c Product<'a>)> = products
        .iter()
        .map(|product| (collation_key(&product.name), *product))
        .collect();

    keyed.sort_by(|(key_a, a), (key_b, b)| {
        let ordering = key_a.cmp(key_b).then_with(|| a.name.cmp(&b.name));

        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    keyed.into_iter().map(|(_, product)| product).collect()
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        discounts::Discount,
        products::{ProductCategory, ProductId},
    };

    use super::*;

    fn product(id: &str, name: &str, price_minor: i64, featured: bool) -> Product<'static> {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Money::from_minor(price_minor, USD),
            discount: Discount::NONE,
            category: ProductCategory::Accesorios,
            stock: 1,
            featured,
            image: None,
        }
    }

    fn ids<'a>(products: &[&'a Product<'_>]) -> Vec<&'a str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn price_desc_orders_most_expensive_first() {
        let a = product("a", "A", 1_000, false);
        let b = product("b", "B", 3_000, false);
        let c = product("c", "C", 2_000, false);
        let input = [&a, &b, &c];

        let sorted = sort_products(&input, SortKey::PriceDesc);

        assert_eq!(ids(&sorted), ["b", "c", "a"]);
        assert_eq!(ids(&input), ["a", "b", "c"], "input must not be reordered");
    }

    #[test]
    fn price_asc_keeps_ties_in_input_order() {
        let a = product("a", "A", 2_000, false);
        let b = product("b", "B", 1_000, false);
        let c = product("c", "C", 2_000, false);

        let sorted = sort_products(&[&a, &b, &c], SortKey::PriceAsc);

        assert_eq!(ids(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn featured_first_is_stable() {
        let a = product("a", "A", 1, false);
        let b = product("b", "B", 1, true);
        let c = product("c", "C", 1, false);
        let d = product("d", "D", 1, true);

        let sorted = sort_products(&[&a, &b, &c, &d], SortKey::Featured);

        assert_eq!(ids(&sorted), ["b", "d", "a", "c"]);
    }

    #[test]
    fn name_sort_ignores_case_and_accents() {
        let a = product("a", "cargador", 1, false);
        let b = product("b", "Árbol", 1, false);
        let c = product("c", "Batería", 1, false);

        let ascending = sort_products(&[&a, &b, &c], SortKey::NameAsc);
        let descending = sort_products(&[&a, &b, &c], SortKey::NameDesc);

        assert_eq!(ids(&ascending), ["b", "c", "a"]);
        assert_eq!(ids(&descending), ["a", "c", "b"]);
    }

    #[test]
    fn resorting_is_idempotent() {
        let products = [
            product("a", "Funda", 3_000, true),
            product("b", "Cargador", 1_000, false),
            product("c", "AirPods", 3_000, false),
            product("d", "Cable", 1_000, true),
        ];
        let input: Vec<&Product<'_>> = products.iter().collect();

        for key in SortKey::ALL {
            let once = sort_products(&input, key);
            let twice = sort_products(&once, key);

            assert_eq!(ids(&once), ids(&twice), "sort by {key} is not stable");
        }
    }

    #[test]
    fn sort_key_parses_selector_values() -> TestResult {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>()?, key);
        }

        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(UnknownSortKey("cheapest".to_string()))
        );
        assert_eq!(SortKey::default(), SortKey::Featured);

        Ok(())
    }
}
