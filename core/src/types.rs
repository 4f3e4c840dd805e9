//! Domain DTOs for the product API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Prices are exact
//! decimals. They go out as JSON numbers and are accepted back either as
//! numbers or numeric strings, since SQL-backed servers often emit the latter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const NAME_MAX_CHARS: usize = 100;
pub const SKU_MAX_CHARS: usize = 50;

/// Smallest accepted price: one cent.
pub fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

/// A product as materialized by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub sku: String,
}

impl Product {
    /// The draft carrying this product's fields, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price,
            sku: self.sku.clone(),
        }
    }

    /// True when every field but `id` equals `draft`'s.
    pub fn matches(&self, draft: &ProductDraft) -> bool {
        self.name == draft.name && self.price == draft.price && self.sku == draft.sku
    }
}

/// Request payload for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub sku: String,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            sku: sku.into(),
        }
    }

    /// Check the field constraints the backend enforces.
    pub fn validate(&self) -> Result<(), ApiError> {
        check_text("name", &self.name, NAME_MAX_CHARS)?;
        check_text("sku", &self.sku, SKU_MAX_CHARS)?;
        if self.price < min_price() {
            return Err(ApiError::Validation(format!(
                "price must be at least {}",
                min_price()
            )));
        }
        Ok(())
    }
}

/// Reject ids the server can never have assigned.
pub fn validate_id(id: i64) -> Result<(), ApiError> {
    if id <= 0 {
        return Err(ApiError::Validation(format!("invalid product id {id}")));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
