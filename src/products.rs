//! Products

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{errors::ValidationError, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id, unique within a store
    pub uuid: ProductUuid,

    /// Product name
    pub name: String,

    /// Product description, may be empty
    pub description: String,

    /// Product price
    pub price: Decimal,

    /// Product category label
    pub category: String,

    /// Units on hand
    pub stock: u32,

    /// Product image, a placeholder is shown when absent
    pub image_url: Option<String>,

    /// When the product was added
    pub created_at: Timestamp,

    /// When the product was last changed
    pub updated_at: Timestamp,
}

impl Product {
    /// Whether any units are on hand.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Product form data.
///
/// The editable fields of a [`Product`], as held by an open form before the
/// controller assigns identity and timestamps. Stock is signed so that a
/// negative entry can be represented and rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFormData {
    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Product price
    pub price: Decimal,

    /// Product category label
    pub category: String,

    /// Units on hand
    pub stock: i64,

    /// Product image
    pub image_url: Option<String>,
}

impl ProductFormData {
    /// Check required fields and numeric minimums.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is missing or out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_valid().map(|_valid| ())
    }

    pub(crate) fn to_valid(&self) -> Result<ValidDraft, ValidationError> {
        let name = self.name.trim();
        let category = self.category.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        if self.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(self.price));
        }

        if self.stock < 0 {
            return Err(ValidationError::NegativeStock(self.stock));
        }

        let stock =
            u32::try_from(self.stock).map_err(|_err| ValidationError::StockOutOfRange(self.stock))?;

        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(ValidDraft {
            name: name.to_string(),
            description: self.description.clone(),
            price: self.price,
            category: category.to_string(),
            stock,
            image_url,
        })
    }
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: i64::from(product.stock),
            image_url: product.image_url.clone(),
        }
    }
}

/// A draft that passed validation, in the shape the store keeps.
#[derive(Debug, Clone)]
pub(crate) struct ValidDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    pub image_url: Option<String>,
}

impl ValidDraft {
    pub(crate) fn into_product(self, uuid: ProductUuid, now: Timestamp) -> Product {
        Product {
            uuid,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply_to(self, product: &mut Product, now: Timestamp) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
        product.category = self.category;
        product.stock = self.stock;
        product.image_url = self.image_url;
        product.updated_at = now.max(product.created_at);
    }
}
