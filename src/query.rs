//! Catalog Query Engine
//!
//! Search, category filtering and sorting are a pure function of the product
//! list and a [`CatalogQuery`]. The store itself is never reordered.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::LazyLock,
};

use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences, options::CollatorOptions};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::products::Product;

/// Errors parsing query selections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Not one of `name`, `price`, `stock`, `date`.
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Not one of `asc`, `desc`.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,

    /// Products whose category matches exactly.
    Named(String),
}

impl CategoryFilter {
    /// Value used for the sentinel in selects and arguments.
    pub const ALL: &'static str = "all";

    /// Whether a product category passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// The value a select option carries.
    pub fn value(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::All => f.write_str("All Categories"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Field the visible list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Product name
    Name,

    /// Product price
    Price,

    /// Units on hand
    Stock,

    /// Creation time
    #[default]
    Date,
}

impl SortKey {
    /// Compare two products on this key, ascending.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => compare_names(&a.name, &b.name),
            Self::Price => a.price.cmp(&b.price),
            Self::Stock => a.stock.cmp(&b.stock),
            Self::Date => a.created_at.cmp(&b.created_at),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Date => "date",
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "date" => Ok(Self::Date),
            other => Err(QueryError::UnknownSortKey(other.to_string())),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest first
    Asc,

    /// Largest first
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Human label, as shown on the toggle button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(QueryError::UnknownSortOrder(other.to_string())),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// The search, filter and sort selections behind the visible list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    /// Free-text search over name and description
    pub search: String,

    /// Category restriction
    pub category: CategoryFilter,

    /// Sort field
    pub sort_key: SortKey,

    /// Sort direction
    pub sort_order: SortOrder,
}

impl CatalogQuery {
    /// Whether a product passes the search and category filters.
    pub fn matches(&self, product: &Product) -> bool {
        SearchNeedle::new(&self.search).matches(product) && self.category.matches(&product.category)
    }

    /// Compare two products by the selected key and direction.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.sort_order.apply(self.sort_key.compare(a, b))
    }

    /// Positions (into `products`) of the visible products, in display order.
    pub fn positions(&self, products: &[Product]) -> Vec<usize> {
        let needle = SearchNeedle::new(&self.search);

        let mut positions: Vec<(usize, &Product)> = products
            .iter()
            .enumerate()
            .filter(|(_, product)| {
                needle.matches(product) && self.category.matches(&product.category)
            })
            .collect();

        // `sort_by` is stable, so equal keys keep store order in either direction.
        positions.sort_by(|(_, a), (_, b)| self.compare(a, b));

        positions.into_iter().map(|(position, _)| position).collect()
    }
}

/// Filter and sort `products` for display.
pub fn derive<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    query
        .positions(products)
        .into_iter()
        .filter_map(|position| products.get(position))
        .collect()
}

/// Category options: the `All` sentinel, then each distinct category in first-seen order.
pub fn categories<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<CategoryFilter> {
    let mut seen = FxHashSet::default();

    let named = products
        .into_iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| CategoryFilter::Named(product.category.clone()));

    std::iter::once(CategoryFilter::All).chain(named).collect()
}

/// Lowercased search term, computed once per derivation.
struct SearchNeedle(Option<String>);

impl SearchNeedle {
    fn new(search: &str) -> Self {
        if search.is_empty() {
            Self(None)
        } else {
            Self(Some(search.to_lowercase()))
        }
    }

    fn matches(&self, product: &Product) -> bool {
        let Some(needle) = self.0.as_deref() else {
            return true;
        };

        product.name.to_lowercase().contains(needle)
            || product.description.to_lowercase().contains(needle)
    }
}

/// Root-locale collator backed by the compiled ICU data.
static NAME_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()).ok()
});

/// Locale-aware name ordering: accents and case only break ties between
/// otherwise equal letters, so "apple" < "Apple" < "Éclair" < "Zebra".
fn compare_names(a: &str, b: &str) -> Ordering {
    let collated = match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };

    collated.then_with(|| a.cmp(b))
}
