//! Catalog view-model
//!
//! [`Catalog`] owns the product store, the query selections and the form
//! session. Every intent runs synchronously and leaves the derived visible
//! list and category options up to date before returning.

use tracing::{debug, warn};

use crate::{
    clock::{Clock, SystemClock},
    controller::CatalogController,
    errors::CatalogError,
    form::{FormMode, FormSession},
    products::{Product, ProductFormData, ProductUuid},
    query::{self, CatalogQuery, CategoryFilter, SortKey},
    store::ProductStore,
};

/// An input event raised by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Open the form for a new product.
    Add,

    /// Open the form pre-filled from a product.
    Edit(ProductUuid),

    /// Remove a product the user has confirmed deleting.
    Delete(ProductUuid),

    /// The search box changed.
    SearchChanged(String),

    /// A category option was picked.
    CategoryChanged(CategoryFilter),

    /// A sort field was picked.
    SortKeyChanged(SortKey),

    /// The sort direction button was pressed.
    SortOrderToggled,

    /// The form was submitted with these values.
    FormSubmit(ProductFormData),

    /// The form was dismissed.
    FormCancel,
}

/// The visible list, memoized on the store revision and query it was built from.
#[derive(Debug, Clone)]
struct DerivedView {
    revision: u64,
    query: CatalogQuery,
    positions: Vec<usize>,
}

/// Product catalog view-model.
#[derive(Debug)]
pub struct Catalog<C: Clock = SystemClock> {
    store: ProductStore,
    controller: CatalogController<C>,
    query: CatalogQuery,
    form: FormSession,
    derived: DerivedView,
    categories: (u64, Vec<CategoryFilter>),
}

impl Catalog<SystemClock> {
    /// Create a catalog over `store` using wall-clock time.
    pub fn new(store: ProductStore) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl Default for Catalog<SystemClock> {
    fn default() -> Self {
        Self::new(ProductStore::new())
    }
}

impl<C: Clock> Catalog<C> {
    /// Create a catalog over `store` with a custom time source.
    pub fn with_clock(store: ProductStore, clock: C) -> Self {
        let selections = CatalogQuery::default();
        let revision = store.revision();

        let derived = DerivedView {
            revision,
            positions: selections.positions(store.as_slice()),
            query: selections.clone(),
        };

        let categories = (revision, query::categories(&store));

        Self {
            store,
            controller: CatalogController::new(clock),
            query: selections,
            form: FormSession::default(),
            derived,
            categories,
        }
    }

    /// The products to display, filtered and sorted.
    pub fn visible(&self) -> Vec<&Product> {
        self.derived
            .positions
            .iter()
            .filter_map(|&position| self.store.as_slice().get(position))
            .collect()
    }

    /// Number of products passing the current filters.
    pub fn visible_len(&self) -> usize {
        self.derived.positions.len()
    }

    /// Category options, `All` first.
    pub fn categories(&self) -> &[CategoryFilter] {
        &self.categories.1
    }

    /// Current search, filter and sort selections.
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Current form session.
    pub fn form(&self) -> &FormSession {
        &self.form
    }

    /// Mutable form access for field edits; submitting still goes through [`Catalog::form_submit`].
    pub fn form_mut(&mut self) -> &mut FormSession {
        &mut self.form
    }

    /// The underlying store, in insertion order.
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Total number of products, ignoring filters.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Open the form for a new product.
    pub fn add_intent(&mut self) {
        debug!("opening form for new product");

        self.form.open_new();
    }

    /// Open the form pre-filled from an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product has gone; the form is unchanged.
    pub fn edit_intent(&mut self, uuid: ProductUuid) -> Result<(), CatalogError> {
        let product = self.store.get(uuid).ok_or(CatalogError::NotFound(uuid))?;

        debug!(product = %uuid, "opening form to edit product");

        self.form.open_edit(product);

        Ok(())
    }

    /// Remove a product. The caller has already asked the user to confirm.
    ///
    /// An unknown id is ignored. If the form was editing the removed product it is closed.
    pub fn delete_intent(&mut self, uuid: ProductUuid) -> Option<Product> {
        let removed = self.controller.delete(&mut self.store, uuid);

        if removed.is_some() && self.form.is_editing(uuid) {
            debug!(product = %uuid, "closing form for deleted product");

            self.form.close();
        }

        self.refresh();

        removed
    }

    /// Update the search term.
    pub fn search_changed(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refresh();
    }

    /// Update the category selection.
    pub fn category_changed(&mut self, category: CategoryFilter) {
        self.query.category = category;
        self.refresh();
    }

    /// Update the sort field.
    pub fn sort_key_changed(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
        self.refresh();
    }

    /// Flip the sort direction.
    pub fn sort_order_toggled(&mut self) {
        self.query.sort_order = self.query.sort_order.toggled();
        self.refresh();
    }

    /// Submit the open form, creating or updating depending on its mode.
    ///
    /// On success the form closes. On failure the store is unchanged and the
    /// form stays open holding the submitted draft.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoActiveForm`] when the form is closed,
    /// [`CatalogError::Validation`] for an invalid draft, or
    /// [`CatalogError::NotFound`] if the product being edited has gone.
    pub fn form_submit(&mut self, draft: ProductFormData) -> Result<Product, CatalogError> {
        let mode = self.form.mode().ok_or(CatalogError::NoActiveForm)?;

        let result = match mode {
            FormMode::New => self.controller.create(&mut self.store, &draft),
            FormMode::Editing(uuid) => self.controller.update(&mut self.store, uuid, &draft),
        };

        match result {
            Ok(product) => {
                self.form.close();
                self.refresh();

                Ok(product)
            }
            Err(error) => {
                warn!(%error, "product form submission rejected");

                self.form.retain_draft(draft);

                Err(error)
            }
        }
    }

    /// Dismiss the form, discarding the draft.
    pub fn form_cancel(&mut self) {
        self.form.close();
    }

    /// Route an [`Intent`] to its handler.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Catalog::edit_intent`] and [`Catalog::form_submit`].
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), CatalogError> {
        match intent {
            Intent::Add => self.add_intent(),
            Intent::Edit(uuid) => self.edit_intent(uuid)?,
            Intent::Delete(uuid) => {
                self.delete_intent(uuid);
            }
            Intent::SearchChanged(search) => self.search_changed(search),
            Intent::CategoryChanged(category) => self.category_changed(category),
            Intent::SortKeyChanged(sort_key) => self.sort_key_changed(sort_key),
            Intent::SortOrderToggled => self.sort_order_toggled(),
            Intent::FormSubmit(draft) => {
                self.form_submit(draft)?;
            }
            Intent::FormCancel => self.form_cancel(),
        }

        Ok(())
    }

    /// Re-derive the visible list and categories if their inputs changed.
    fn refresh(&mut self) {
        let revision = self.store.revision();

        if self.categories.0 != revision {
            self.categories = (revision, query::categories(&self.store));
        }

        if self.derived.revision == revision && self.derived.query == self.query {
            return;
        }

        self.derived = DerivedView {
            revision,
            query: self.query.clone(),
            positions: self.query.positions(self.store.as_slice()),
        };

        debug!(
            visible = self.derived.positions.len(),
            total = self.store.len(),
            "catalog view refreshed"
        );
    }
}
