//! Admin Forms
//!
//! Raw form input as typed by the administrator, and the typed records it validates into.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::admin::AdminError;

/// Error returned when a select value is not one of its options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown option: {0}")]
pub struct UnknownOption(pub String);

/// Colors suggested by the product form's color select.
///
/// Color is optional free text and is not checked against this list: stored records carry
/// colors outside it, such as "Oro".
pub const COLOR_OPTIONS: [&str; 10] = [
    "Titanio Negro",
    "Titanio Blanco",
    "Titanio Azul",
    "Titanio Natural",
    "Negro",
    "Blanco",
    "Rosa",
    "Amarillo",
    "Verde",
    "Azul",
];

macro_rules! form_option {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $value]
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &[$name] = &[$($name::$variant),+];

            /// Option value as shown in the form.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == s)
                    .ok_or_else(|| UnknownOption(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

form_option! {
    /// Admin product line, independent of the storefront categories.
    ProductLine {
        Pro => "Pro",
        Standard => "Standard",
        Se => "SE",
    }
}

form_option! {
    /// Storage capacity.
    Storage {
        Gb128 => "128GB",
        Gb256 => "256GB",
        Gb512 => "512GB",
        Tb1 => "1TB",
    }
}

form_option! {
    /// Device condition.
    Condition {
        Nuevo => "Nuevo",
        Reacondicionado => "Reacondicionado",
        Usado => "Usado",
    }
}

/// A product as handed to the admin store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Present when editing an existing product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Product line
    pub category: ProductLine,

    /// Units in stock
    pub stock: u32,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Color
    #[serde(default)]
    pub color: String,

    /// Storage capacity
    pub storage: Storage,

    /// Device condition
    pub condition: Condition,

    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A category as handed to the admin store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Present when editing an existing category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Category name
    pub name: String,

    /// Category description
    pub description: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Number of products, as stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

/// Product form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Set when editing
    pub id: Option<String>,
    /// Name field
    pub name: String,
    /// Description field
    pub description: String,
    /// Price field
    pub price: String,
    /// Product line select
    pub category: String,
    /// Stock field
    pub stock: String,
    /// Image URL field
    pub image: String,
    /// Color select
    pub color: String,
    /// Storage select
    pub storage: String,
    /// Condition select
    pub condition: String,
}

impl ProductForm {
    /// Form pre-filled from an existing record.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price.to_string(),
            category: record.category.to_string(),
            stock: record.stock.to_string(),
            image: record.image.clone(),
            color: record.color.clone(),
            storage: record.storage.to_string(),
            condition: record.condition.to_string(),
        }
    }

    /// Names of required fields left blank, in form order.
    pub fn missing_fields(&self) -> SmallVec<[&'static str; 8]> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("price", &self.price),
            ("category", &self.category),
            ("stock", &self.stock),
            ("image", &self.image),
            ("storage", &self.storage),
            ("condition", &self.condition),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Validate the input into a record.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::MissingField`] for the first blank required field,
    /// [`AdminError::InvalidNumber`] for a malformed or negative price or stock, and
    /// [`AdminError::InvalidOption`] for a select value outside its options.
    pub fn validate(&self) -> Result<ProductRecord, AdminError> {
        if let Some(&field) = self.missing_fields().first() {
            return Err(AdminError::MissingField(field));
        }

        Ok(ProductRecord {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_price(&self.price)?,
            category: parse_option("category", &self.category)?,
            stock: parse_stock(&self.stock)?,
            image: self.image.trim().to_string(),
            color: self.color.trim().to_string(),
            storage: parse_option("storage", &self.storage)?,
            condition: parse_option("condition", &self.condition)?,
            created_at: None,
        })
    }
}

/// Category form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    /// Set when editing
    pub id: Option<String>,
    /// Name field
    pub name: String,
    /// Description field
    pub description: String,
    /// Image URL field
    pub image: String,
}

impl CategoryForm {
    /// Form pre-filled from an existing record.
    #[must_use]
    pub fn from_record(record: &CategoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
        }
    }

    /// Names of required fields left blank, in form order.
    pub fn missing_fields(&self) -> SmallVec<[&'static str; 8]> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("image", &self.image),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Validate the input into a record.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::MissingField`] for the first blank required field.
    pub fn validate(&self) -> Result<CategoryRecord, AdminError> {
        if let Some(&field) = self.missing_fields().first() {
            return Err(AdminError::MissingField(field));
        }

        Ok(CategoryRecord {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            product_count: None,
        })
    }
}

fn invalid_number(field: &'static str, value: &str) -> AdminError {
    AdminError::InvalidNumber {
        field,
        value: value.to_string(),
    }
}

fn parse_price(value: &str) -> Result<Decimal, AdminError> {
    let price = Decimal::from_str(value.trim()).map_err(|_err| invalid_number("price", value))?;

    if price.is_sign_negative() {
        return Err(invalid_number("price", value));
    }

    Ok(price)
}

fn parse_stock(value: &str) -> Result<u32, AdminError> {
    value
        .trim()
        .parse()
        .map_err(|_err| invalid_number("stock", value))
}

fn parse_option<T: FromStr>(field: &'static str, value: &str) -> Result<T, AdminError> {
    value
        .trim()
        .parse()
        .map_err(|_err| AdminError::InvalidOption {
            field,
            value: value.to_string(),
        })
}
