//! Product Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::ProductFormData};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "129.99 USD")
    pub price: String,

    /// Product category
    pub category: String,

    /// Units on hand
    pub stock: i64,

    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Creation time; the loading clock is used when omitted
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl ProductFixture {
    /// Convert into a form draft, returning the price currency alongside.
    ///
    /// # Errors
    ///
    /// Returns an error if the price string cannot be parsed.
    pub fn to_draft(&self) -> Result<(ProductFormData, &'static Currency), FixtureError> {
        let (price, currency) = parse_price(&self.price)?;

        let draft = ProductFormData {
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            category: self.category.clone(),
            stock: self.stock,
            image_url: self.image_url.clone(),
        };

        Ok((draft, currency))
    }
}

/// Parse price string (e.g., "2.99 GBP") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    Ok((amount, currency))
}

/// Map an ISO code to one of the supported currencies.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything but GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
