//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::query::{CatalogQuery, CategoryFilter, SortKey, SortOrder};

/// Arguments for the catalog example
#[derive(Debug, Parser)]
pub struct ExampleCatalogArgs {
    /// Fixture set to seed the catalog from
    #[clap(short, long, default_value = "default")]
    pub fixture: String,

    /// Directory holding `products/<fixture>.yml`
    #[clap(long, default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Search term matched against name and description
    #[clap(short, long, default_value = "")]
    pub search: String,

    /// Category to show, or `all`
    #[clap(short, long, default_value = CategoryFilter::ALL)]
    pub category: String,

    /// Sort field: name, price, stock or date
    #[clap(long, default_value = "date")]
    pub sort: SortKey,

    /// Sort direction: asc or desc
    #[clap(short, long, default_value = "desc")]
    pub order: SortOrder,

    /// Log level used when `RUST_LOG` is unset
    #[clap(short, long, default_value = "info")]
    pub log_level: String,
}

impl ExampleCatalogArgs {
    /// The query selections these arguments describe.
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.clone(),
            category: CategoryFilter::from(self.category.as_str()),
            sort_key: self.sort,
            sort_order: self.order,
        }
    }
}
