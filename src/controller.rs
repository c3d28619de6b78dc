//! CRUD Controller

use tracing::{debug, info};

use crate::{
    clock::{Clock, SystemClock},
    errors::CatalogError,
    products::{Product, ProductFormData, ProductUuid},
    store::ProductStore,
};

/// Applies create, update and delete to a [`ProductStore`], stamping ids and timestamps.
#[derive(Debug, Clone, Default)]
pub struct CatalogController<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> CatalogController<C> {
    /// Create a controller that reads time from `clock`.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// The controller's time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate a draft and append it as a new product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if a required field is empty or a
    /// numeric field is negative. The store is left untouched.
    pub fn create(
        &self,
        store: &mut ProductStore,
        draft: &ProductFormData,
    ) -> Result<Product, CatalogError> {
        let valid = draft.to_valid()?;
        let product = valid.into_product(ProductUuid::new(), self.clock.now());

        store.push(product.clone());

        info!(product = %product.uuid, name = %product.name, "created product");

        Ok(product)
    }

    /// Replace every editable field of an existing product.
    ///
    /// The product keeps its id, creation time and position; `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id, or
    /// [`CatalogError::Validation`] if the draft is invalid.
    pub fn update(
        &self,
        store: &mut ProductStore,
        uuid: ProductUuid,
        draft: &ProductFormData,
    ) -> Result<Product, CatalogError> {
        if !store.contains(uuid) {
            return Err(CatalogError::NotFound(uuid));
        }

        let valid = draft.to_valid()?;
        let now = self.clock.now();

        let product = store.get_mut(uuid).ok_or(CatalogError::NotFound(uuid))?;

        valid.apply_to(product, now);

        info!(product = %uuid, name = %product.name, "updated product");

        Ok(product.clone())
    }

    /// Remove a product. Confirmation is the caller's concern.
    ///
    /// Deleting an id that is not present is a no-op and returns `None`.
    pub fn delete(&self, store: &mut ProductStore, uuid: ProductUuid) -> Option<Product> {
        let removed = store.remove(uuid);

        match &removed {
            Some(product) => info!(product = %uuid, name = %product.name, "deleted product"),
            None => debug!(product = %uuid, "delete ignored, product not found"),
        }

        removed
    }
}
