//! Catalog errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::ProductUuid;

/// A draft was rejected before it reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The product name is empty.
    #[error("product name is required")]
    MissingName,

    /// The product category is empty.
    #[error("product category is required")]
    MissingCategory,

    /// The price is below zero.
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// The stock quantity is below zero.
    #[error("stock must not be negative, got {0}")]
    NegativeStock(i64),

    /// The stock quantity does not fit the stored range.
    #[error("stock quantity {0} is too large")]
    StockOutOfRange(i64),
}

/// Errors raised by catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The submitted draft failed validation.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// The target product is no longer in the store.
    #[error("product {0} not found")]
    NotFound(ProductUuid),

    /// A form submission arrived while no form was open.
    #[error("no product form is open")]
    NoActiveForm,
}

impl CatalogError {
    /// Whether the error is a validation failure the user can correct in the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
