//! Catalog table renderer
//!
//! Terminal stand-in for the product grid: one row per visible product,
//! followed by the "Showing X of Y products" line.

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{catalog::Catalog, clock::Clock, products::Product};

/// Errors that can occur when rendering the catalog.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("IO error")]
    IO(#[source] io::Error),
}

/// Writes the visible catalog.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_catalog<C: Clock>(
    mut out: impl io::Write,
    catalog: &Catalog<C>,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    let visible = catalog.visible();
    let query = catalog.query();

    writeln!(
        out,
        "Category: {}  Sort: {} ({})  Search: {:?}",
        query.category,
        query.sort_key,
        query.sort_order.label(),
        query.search
    )
    .map_err(RenderError::IO)?;

    if visible.is_empty() {
        writeln!(out, "\nNo products found").map_err(RenderError::IO)?;
    } else {
        write_product_table(&mut out, &visible, currency)?;
    }

    writeln!(out, "\n{}", summary(visible.len(), catalog.len())).map_err(RenderError::IO)
}

/// The "Showing X of Y products" line.
pub fn summary(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} products")
}

/// Format a price in the catalog currency, e.g. `$129.99`.
pub fn format_price(price: Decimal, currency: &'static Currency) -> String {
    price
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.round_dp(0).to_i64())
        .map_or_else(
            || format!("{price} {}", currency.iso_alpha_code),
            |minor| format!("{}", Money::from_minor(minor, currency)),
        )
}

fn write_product_table(
    out: &mut impl io::Write,
    products: &[&Product],
    currency: &'static Currency,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Name", "Category", "Price", "Stock", "Description", "Image"]);

    for (idx, product) in products.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            product.category.clone(),
            format_price(product.price, currency),
            format!("{} units", product.stock),
            description(product).to_string(),
            product.image_url.as_deref().unwrap_or("[no image]").to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    for (idx, product) in products.iter().enumerate() {
        let stock_color = if product.in_stock() {
            Color::FG_GREEN
        } else {
            Color::FG_RED
        };

        // header is row 0
        table.modify((idx + 1, 4), stock_color);
    }

    writeln!(out, "\n{table}").map_err(RenderError::IO)
}

fn description(product: &Product) -> &str {
    if product.description.is_empty() {
        "No description available"
    } else {
        &product.description
    }
}
