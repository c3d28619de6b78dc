//! Integration tests for the catalog view-model.
//!
//! Walks the catalog through the user flows the UI drives: searching,
//! filtering, sorting, and the add/edit/delete cycle through the form.

use jiff::{Timestamp, ToSpan};
use rust_decimal::Decimal;
use testresult::TestResult;

use catalog::{clock::MockClock, prelude::*};

fn draft(name: &str, category: &str, price: Decimal, stock: i64) -> ProductFormData {
    ProductFormData {
        name: name.to_string(),
        description: String::new(),
        price,
        category: category.to_string(),
        stock,
        image_url: None,
    }
}

/// A clock that advances one minute per reading, starting at `start`.
fn ticking_clock(start: Timestamp) -> MockClock {
    let mut clock = MockClock::new();
    let mut next = start;

    clock.expect_now().returning(move || {
        let now = next;
        next = next.checked_add(1.minute()).unwrap_or(next);
        now
    });

    clock
}

fn seeded() -> TestResult<Catalog> {
    Ok(Fixture::from_set("default")?.into_catalog())
}

fn names(catalog: &Catalog<impl Clock>) -> Vec<String> {
    catalog.visible().iter().map(|p| p.name.clone()).collect()
}

#[test]
fn search_finds_mat_but_not_desk() -> TestResult {
    let mut catalog = Catalog::with_clock(
        ProductStore::new(),
        ticking_clock("2024-01-01T00:00:00Z".parse()?),
    );

    catalog.add_intent();
    catalog.form_submit(draft("Mat", "Sports", Decimal::new(10, 0), 5))?;

    catalog.search_changed("mat");
    assert_eq!(catalog.visible_len(), 1);

    catalog.search_changed("desk");
    assert_eq!(catalog.visible_len(), 0);

    catalog.search_changed("");
    assert_eq!(catalog.visible_len(), 1);

    Ok(())
}

#[test]
fn create_appends_one_product_with_matching_timestamps() -> TestResult {
    let mut catalog = seeded()?;
    let before: Vec<ProductUuid> = catalog.store().iter().map(|p| p.uuid).collect();

    catalog.add_intent();
    let pen = catalog.form_submit(draft("Pen", "Office", Decimal::ONE, 100))?;

    assert_eq!(catalog.len(), before.len() + 1);
    assert!(!before.contains(&pen.uuid));
    assert_eq!(pen.created_at, pen.updated_at);
    assert_eq!(
        catalog.store().as_slice().last().map(|p| p.uuid),
        Some(pen.uuid)
    );

    Ok(())
}

#[test]
fn price_sort_toggles_between_directions() -> TestResult {
    let mut catalog = Catalog::default();

    for (name, price) in [("Ten", 10), ("Five", 5)] {
        catalog.add_intent();
        catalog.form_submit(draft(name, "Misc", Decimal::new(price, 0), 1))?;
    }

    catalog.sort_key_changed(SortKey::Price);
    if catalog.query().sort_order == SortOrder::Desc {
        catalog.sort_order_toggled();
    }

    assert_eq!(names(&catalog), ["Five", "Ten"]);

    catalog.sort_order_toggled();
    assert_eq!(names(&catalog), ["Ten", "Five"]);

    catalog.sort_order_toggled();
    assert_eq!(names(&catalog), ["Five", "Ten"]);

    Ok(())
}

#[test]
fn delete_absent_id_changes_nothing() -> TestResult {
    let mut catalog = seeded()?;
    let before: Vec<Product> = catalog.store().as_slice().to_vec();

    let removed = catalog.delete_intent(ProductUuid::new());

    assert!(removed.is_none());
    assert_eq!(catalog.store().as_slice(), before.as_slice());

    Ok(())
}

#[test]
fn create_then_delete_round_trips_store() -> TestResult {
    let mut catalog = seeded()?;
    let before: Vec<Product> = catalog.store().as_slice().to_vec();

    catalog.add_intent();
    let lamp = catalog.form_submit(draft("Lamp", "Home", Decimal::new(25, 0), 3))?;
    catalog.delete_intent(lamp.uuid);

    assert_eq!(catalog.store().as_slice(), before.as_slice());

    Ok(())
}

#[test]
fn edit_flow_preserves_identity_and_advances_updated_at() -> TestResult {
    let mut catalog = Catalog::with_clock(ProductStore::new(), ticking_clock(Timestamp::UNIX_EPOCH));

    catalog.add_intent();
    let mat = catalog.form_submit(draft("Mat", "Sports", Decimal::new(10, 0), 5))?;

    catalog.edit_intent(mat.uuid)?;

    let mut edited = catalog
        .form()
        .draft()
        .cloned()
        .ok_or("Expected an open draft")?;
    edited.name = "Yoga Mat".to_string();
    edited.description = "Non-slip".to_string();
    edited.price = Decimal::new(3499, 2);
    edited.category = "Fitness".to_string();
    edited.stock = 88;

    let updated = catalog.form_submit(edited)?;

    assert_eq!(updated.uuid, mat.uuid);
    assert_eq!(updated.created_at, mat.created_at);
    assert!(updated.updated_at > mat.updated_at);
    assert_eq!(updated.name, "Yoga Mat");
    assert_eq!(updated.description, "Non-slip");
    assert_eq!(updated.price, Decimal::new(3499, 2));
    assert_eq!(updated.category, "Fitness");
    assert_eq!(updated.stock, 88);
    assert_eq!(
        catalog.categories(),
        [
            CategoryFilter::All,
            CategoryFilter::Named("Fitness".to_string())
        ]
    );

    Ok(())
}

#[test]
fn search_results_match_and_exclusions_do_not() -> TestResult {
    let mut catalog = seeded()?;

    for term in ["", "o", "WATCH", "cushioning", "laptop", "zzz"] {
        catalog.search_changed(term);

        let needle = term.to_lowercase();
        let visible: Vec<ProductUuid> = catalog.visible().iter().map(|p| p.uuid).collect();

        for product in catalog.store() {
            let matches = product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);

            assert_eq!(
                visible.contains(&product.uuid),
                matches,
                "search {term:?} disagreed on {}",
                product.name
            );
        }
    }

    Ok(())
}

#[test]
fn category_filter_restricts_and_all_restores() -> TestResult {
    let mut catalog = seeded()?;
    catalog.search_changed("e");

    let unfiltered = catalog.visible_len();

    let options: Vec<CategoryFilter> = catalog.categories().to_vec();
    assert_eq!(options.first(), Some(&CategoryFilter::All));

    for option in options.iter().skip(1) {
        catalog.category_changed(option.clone());

        assert!(
            catalog
                .visible()
                .iter()
                .all(|p| p.category == option.value()),
            "category {option} leaked other products"
        );
    }

    catalog.category_changed(CategoryFilter::All);

    assert_eq!(catalog.visible_len(), unfiltered);

    Ok(())
}

#[test]
fn every_sort_key_orders_consistently() -> TestResult {
    let mut catalog = seeded()?;

    for key in [SortKey::Name, SortKey::Price, SortKey::Stock, SortKey::Date] {
        catalog.sort_key_changed(key);

        for _ in 0..2 {
            let query = catalog.query().clone();
            let visible = catalog.visible();

            for pair in visible.windows(2) {
                if let [a, b] = pair {
                    assert!(
                        query.compare(a, b).is_le(),
                        "{key} {} out of order: {} before {}",
                        query.sort_order,
                        a.name,
                        b.name
                    );
                }
            }

            catalog.sort_order_toggled();
        }
    }

    Ok(())
}

#[test]
fn rejected_submission_keeps_form_and_store() -> TestResult {
    let mut catalog = seeded()?;
    let before = catalog.len();

    catalog.dispatch(Intent::Add)?;

    let result = catalog.dispatch(Intent::FormSubmit(draft(
        "Freebie",
        "Promo",
        Decimal::new(-1, 0),
        1,
    )));

    assert!(
        matches!(
            result,
            Err(CatalogError::Validation(ValidationError::NegativePrice(_)))
        ),
        "expected NegativePrice, got {result:?}"
    );
    assert_eq!(catalog.len(), before);
    assert!(catalog.form().is_open());

    catalog.dispatch(Intent::FormCancel)?;

    assert!(!catalog.form().is_open());

    Ok(())
}
