//! Fixtures
//!
//! Seed catalogs read from `<base>/products/<name>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    clock::{Clock, SystemClock},
    errors::ValidationError,
    fixtures::products::ProductsFixture,
    products::ProductUuid,
    store::ProductStore,
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product failed the same checks the form applies
    #[error("Invalid product {name:?}: {source}")]
    InvalidProduct {
        /// Product name as written in the fixture
        name: String,
        /// What was wrong with it
        source: ValidationError,
    },

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products loaded so far, in file order
    store: ProductStore,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            store: ProductStore::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file, stamping them with wall-clock time
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a product is
    /// invalid, or currencies are mixed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.load_products_with_clock(name, &SystemClock)
    }

    /// Load products from a YAML fixture file
    ///
    /// Products without a `created_at` are stamped from `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a product is
    /// invalid, or currencies are mixed.
    pub fn load_products_with_clock(
        &mut self,
        name: &str,
        clock: &impl Clock,
    ) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            let (draft, currency) = product_fixture.to_draft()?;

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let valid = draft
                .to_valid()
                .map_err(|source| FixtureError::InvalidProduct {
                    name: product_fixture.name.clone(),
                    source,
                })?;

            let created_at = product_fixture.created_at.unwrap_or_else(|| clock.now());

            self.store
                .push(valid.into_product(ProductUuid::new(), created_at));
        }

        debug!(
            fixture = name,
            products = self.store.len(),
            "loaded product fixture"
        );

        Ok(self)
    }

    /// Load a fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the product fixture cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Products loaded so far
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Hand the loaded products to a new catalog
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.store)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
