//! Catalog Example
//!
//! Seeds a catalog from a fixture set and prints the visible products.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s`, `-c`, `--sort` and `-o` to search, filter and sort

use std::io;

use anyhow::Result;
use catalog::{
    catalog::Intent, fixtures::Fixture, render::write_catalog, utils::ExampleCatalogArgs,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Catalog Example
pub fn main() -> Result<()> {
    let args = ExampleCatalogArgs::parse();

    init_logging(&args.log_level)?;

    let mut fixture = Fixture::with_base_path(&args.fixtures_dir);
    fixture.load_products(&args.fixture)?;

    let currency = fixture.currency()?;
    let mut catalog = fixture.into_catalog();
    let query = args.query();

    catalog.dispatch(Intent::SearchChanged(query.search))?;
    catalog.dispatch(Intent::CategoryChanged(query.category))?;
    catalog.dispatch(Intent::SortKeyChanged(query.sort_key))?;

    if catalog.query().sort_order != query.sort_order {
        catalog.dispatch(Intent::SortOrderToggled)?;
    }

    info!(
        fixture = %args.fixture,
        visible = catalog.visible_len(),
        total = catalog.len(),
        "catalog ready"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_catalog(&mut handle, &catalog, currency)?;

    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
