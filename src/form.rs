//! Form Session

use crate::products::{Product, ProductFormData, ProductUuid};

/// What a submitted draft will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new product.
    New,

    /// Submitting updates the product with this id.
    Editing(ProductUuid),
}

impl FormMode {
    /// Heading for the form.
    pub fn title(self) -> &'static str {
        match self {
            Self::New => "Add New Product",
            Self::Editing(_) => "Edit Product",
        }
    }

    /// Label for the submit button.
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::New => "Add Product",
            Self::Editing(_) => "Update Product",
        }
    }
}

/// The product form: closed, or open with a draft.
///
/// There is only ever one session; opening replaces whatever draft was there.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormSession {
    /// No form shown.
    #[default]
    Closed,

    /// Form shown with an in-progress draft.
    Open {
        /// Field values as currently entered
        draft: ProductFormData,

        /// Create or update
        mode: FormMode,
    },
}

impl FormSession {
    /// Open an empty draft for a new product.
    pub fn open_new(&mut self) {
        *self = Self::Open {
            draft: ProductFormData::default(),
            mode: FormMode::New,
        };
    }

    /// Open a draft pre-filled from an existing product.
    pub fn open_edit(&mut self, product: &Product) {
        *self = Self::Open {
            draft: ProductFormData::from(product),
            mode: FormMode::Editing(product.uuid),
        };
    }

    /// Discard any draft.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether the form is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The open session's mode.
    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Self::Closed => None,
            Self::Open { mode, .. } => Some(*mode),
        }
    }

    /// The open session's draft.
    pub fn draft(&self) -> Option<&ProductFormData> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } => Some(draft),
        }
    }

    /// Mutable access for field edits while the form is open.
    pub fn draft_mut(&mut self) -> Option<&mut ProductFormData> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } => Some(draft),
        }
    }

    /// Whether the open session is editing this product.
    pub fn is_editing(&self, uuid: ProductUuid) -> bool {
        self.mode() == Some(FormMode::Editing(uuid))
    }

    /// Keep the session open with the draft as last submitted.
    pub(crate) fn retain_draft(&mut self, submitted: ProductFormData) {
        if let Some(draft) = self.draft_mut() {
            *draft = submitted;
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use super::*;

    fn product() -> Product {
        let now = Timestamp::now();

        Product {
            uuid: ProductUuid::new(),
            name: "Smart Watch".to_string(),
            description: "Fitness tracking".to_string(),
            price: Decimal::new(24999, 2),
            category: "Electronics".to_string(),
            stock: 28,
            image_url: Some("https://example.com/watch.jpg".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn starts_closed() {
        let form = FormSession::default();

        assert!(!form.is_open());
        assert!(form.draft().is_none());
        assert!(form.mode().is_none());
    }

    #[test]
    fn open_new_has_default_draft() {
        let mut form = FormSession::default();

        form.open_new();

        assert_eq!(form.mode(), Some(FormMode::New));
        assert_eq!(form.draft(), Some(&ProductFormData::default()));
    }

    #[test]
    fn open_edit_copies_product_fields() {
        let product = product();
        let mut form = FormSession::default();

        form.open_edit(&product);

        assert_eq!(form.mode(), Some(FormMode::Editing(product.uuid)));
        assert!(form.is_editing(product.uuid));
        assert_eq!(form.draft(), Some(&ProductFormData::from(&product)));
    }

    #[test]
    fn opening_again_replaces_draft() {
        let product = product();
        let mut form = FormSession::default();

        form.open_edit(&product);
        form.open_new();

        assert_eq!(form.mode(), Some(FormMode::New));
        assert_eq!(form.draft(), Some(&ProductFormData::default()));
    }

    #[test]
    fn close_discards_draft() {
        let mut form = FormSession::default();
        form.open_new();

        if let Some(draft) = form.draft_mut() {
            draft.name = "Half typed".to_string();
        }

        form.close();

        assert_eq!(form, FormSession::Closed);
    }

    #[test]
    fn retain_draft_is_ignored_when_closed() {
        let mut form = FormSession::default();

        form.retain_draft(ProductFormData::default());

        assert!(!form.is_open());
    }

    #[test]
    fn labels_follow_mode() {
        assert_eq!(FormMode::New.title(), "Add New Product");
        assert_eq!(FormMode::New.submit_label(), "Add Product");

        let editing = FormMode::Editing(ProductUuid::new());

        assert_eq!(editing.title(), "Edit Product");
        assert_eq!(editing.submit_label(), "Update Product");
    }
}
