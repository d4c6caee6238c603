mod common;

use stockbook_core::products::{
    ProductError, ProductQuery, ProductService, ProductSortBy, ProductUpdate, SortOrder,
};

#[test]
fn create_and_fetch_a_product() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    let created = common::create_product(&db.pool, user_id, "Blue Widget", Some("BW-1"), 9.99, 12);
    assert_eq!(created.stock_quantity, 12);

    let fetched = products.get_product(user_id, created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn sku_is_unique_per_owner_not_globally() {
    let db = common::setup();
    let alice = common::register_user(&db.pool, "alice@example.com");
    let bob = common::register_user(&db.pool, "bob@example.com");
    let products = ProductService::new(db.pool.clone());

    common::create_product(&db.pool, alice, "Widget", Some("W-1"), 10.0, 5);

    let dup = products.create_product(alice, common::new_product("Other", Some("W-1"), 4.0, 1));
    assert!(matches!(dup, Err(ProductError::DuplicateSku(ref s)) if s == "W-1"));

    // same SKU under a different owner is fine
    common::create_product(&db.pool, bob, "Bob's Widget", Some("W-1"), 10.0, 5);

    // products without a SKU never collide
    common::create_product(&db.pool, alice, "No Sku A", None, 1.0, 1);
    common::create_product(&db.pool, alice, "No Sku B", None, 1.0, 1);
}

#[test]
fn search_matches_substrings_case_insensitively() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    common::create_product(&db.pool, user_id, "Blue Widget", Some("BW-1"), 9.99, 3);
    common::create_product(&db.pool, user_id, "Red Gadget", Some("RG-7"), 4.5, 8);

    let by_name = products
        .get_products(
            user_id,
            &ProductQuery {
                search: Some("wIdGeT".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Blue Widget");

    let by_sku = products
        .get_products(
            user_id,
            &ProductQuery {
                search: Some("rg-".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].name, "Red Gadget");

    let none = products
        .get_products(
            user_id,
            &ProductQuery {
                search: Some("sprocket".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn listing_is_scoped_to_the_owner() {
    let db = common::setup();
    let alice = common::register_user(&db.pool, "alice@example.com");
    let bob = common::register_user(&db.pool, "bob@example.com");
    let products = ProductService::new(db.pool.clone());

    common::create_product(&db.pool, alice, "Alice's Widget", None, 10.0, 5);
    let bobs = common::create_product(&db.pool, bob, "Bob's Widget", None, 10.0, 5);

    let listed = products
        .get_products(alice, &ProductQuery::default())
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Alice's Widget");

    let cross = products.get_product(alice, bobs.id);
    assert!(matches!(cross, Err(ProductError::NotFound(_))));
}

#[test]
fn sorting_honors_known_keys_and_falls_back_on_garbage() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    common::create_product(&db.pool, user_id, "Cheap", None, 1.0, 9);
    common::create_product(&db.pool, user_id, "Mid", None, 5.0, 2);
    common::create_product(&db.pool, user_id, "Dear", None, 20.0, 4);

    let by_price_desc = products
        .get_products(
            user_id,
            &ProductQuery {
                sort_by: ProductSortBy::from("price"),
                sort_order: SortOrder::from("desc"),
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<&str> = by_price_desc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Dear", "Mid", "Cheap"]);

    // a hostile sort key degrades to the name ordering, never to SQL
    let fallback = products
        .get_products(
            user_id,
            &ProductQuery {
                sort_by: ProductSortBy::from("name; DROP TABLE products"),
                sort_order: SortOrder::from("sideways"),
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<&str> = fallback.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Cheap", "Dear", "Mid"]);
}

#[test]
fn partial_update_touches_only_the_given_fields() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    let created = common::create_product(&db.pool, user_id, "Widget", Some("W-1"), 10.0, 5);

    let updated = products
        .update_product(
            user_id,
            created.id,
            ProductUpdate {
                selling_price: Some(12.5),
                sku: Some(None),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.selling_price, 12.5);
    assert_eq!(updated.sku, None);
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.stock_quantity, 5);
    assert!(updated.updated_at >= created.updated_at);
}

#[test]
fn delete_removes_the_product() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    let created = common::create_product(&db.pool, user_id, "Widget", None, 10.0, 5);
    products.delete_product(user_id, created.id).unwrap();

    assert!(matches!(
        products.get_product(user_id, created.id),
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        products.delete_product(user_id, created.id),
        Err(ProductError::NotFound(_))
    ));
}

#[test]
fn stock_adjustment_never_goes_below_zero() {
    let db = common::setup();
    let user_id = common::register_user(&db.pool, "seller@example.com");
    let products = ProductService::new(db.pool.clone());

    let created = common::create_product(&db.pool, user_id, "Widget", None, 10.0, 4);

    let restocked = products.adjust_stock(user_id, created.id, 6).unwrap();
    assert_eq!(restocked.stock_quantity, 10);

    let drained = products.adjust_stock(user_id, created.id, -10).unwrap();
    assert_eq!(drained.stock_quantity, 0);

    let overdraw = products.adjust_stock(user_id, created.id, -1);
    assert!(matches!(
        overdraw,
        Err(ProductError::InsufficientStock {
            available: 0,
            requested: 1
        })
    ));

    // the failed adjustment left the row untouched
    let after = products.get_product(user_id, created.id).unwrap();
    assert_eq!(after.stock_quantity, 0);
}
