//! Catalog
//!
//! In-memory product catalog view-model: search, category filtering and
//! sorting over a product store, with the create/edit form and CRUD rules
//! that keep the list and the form consistent.

pub mod catalog;
pub mod clock;
pub mod controller;
pub mod errors;
pub mod fixtures;
pub mod form;
pub mod prelude;
pub mod products;
pub mod query;
pub mod render;
pub mod store;
pub mod utils;
pub mod uuids;
