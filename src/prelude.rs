//! Catalog prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, Intent},
    clock::{Clock, SystemClock},
    controller::CatalogController,
    errors::{CatalogError, ValidationError},
    fixtures::{Fixture, FixtureError},
    form::{FormMode, FormSession},
    products::{Product, ProductFormData, ProductUuid},
    query::{CatalogQuery, CategoryFilter, QueryError, SortKey, SortOrder, categories, derive},
    render::{RenderError, write_catalog},
    store::ProductStore,
};
