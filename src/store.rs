//! Product Store

use crate::products::{Product, ProductUuid};

/// The in-memory, insertion-ordered list of products.
///
/// Only the crate's controller and fixture loader mutate the store. Every
/// mutation bumps [`ProductStore::revision`], which derived views use to
/// tell whether they are stale.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
    revision: u64,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Products in insertion order.
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    /// Iterate products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Look up a product by id.
    pub fn get(&self, uuid: ProductUuid) -> Option<&Product> {
        self.products.iter().find(|product| product.uuid == uuid)
    }

    /// Position of a product in insertion order.
    pub fn position(&self, uuid: ProductUuid) -> Option<usize> {
        self.products.iter().position(|product| product.uuid == uuid)
    }

    /// Whether a product with this id is present.
    pub fn contains(&self, uuid: ProductUuid) -> bool {
        self.position(uuid).is_some()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn push(&mut self, product: Product) {
        self.products.push(product);
        self.bump();
    }

    pub(crate) fn get_mut(&mut self, uuid: ProductUuid) -> Option<&mut Product> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.uuid == uuid)?;

        self.revision = self.revision.wrapping_add(1);

        Some(product)
    }

    pub(crate) fn remove(&mut self, uuid: ProductUuid) -> Option<Product> {
        let position = self.position(uuid)?;
        let removed = self.products.remove(position);

        self.bump();

        Some(removed)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a ProductStore {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str) -> Product {
        let now = Timestamp::now();

        Product {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::ONE,
            category: "Misc".to_string(),
            stock: 1,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn push_keeps_insertion_order_and_bumps_revision() {
        let mut store = ProductStore::new();

        store.push(product("A"));
        store.push(product("B"));

        let names: Vec<&str> = store.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["A", "B"]);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn remove_missing_id_leaves_revision_alone() {
        let mut store = ProductStore::new();
        store.push(product("A"));

        let removed = store.remove(ProductUuid::new());

        assert!(removed.is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn remove_returns_product_and_bumps_revision() {
        let mut store = ProductStore::new();
        let a = product("A");
        let uuid = a.uuid;
        store.push(a);

        let removed = store.remove(uuid);

        assert_eq!(removed.map(|p| p.uuid), Some(uuid));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn get_mut_missing_id_leaves_revision_alone() {
        let mut store = ProductStore::new();
        store.push(product("A"));

        assert!(store.get_mut(ProductUuid::new()).is_none());
        assert_eq!(store.revision(), 1);
    }
}
