use profitdesk_core::{
    catalog::Catalog,
    config::reference_product,
    error::DeskError,
    store::CatalogStore,
};

fn open_store() -> CatalogStore {
    let store = CatalogStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

#[test]
fn fresh_store_is_empty() {
    let store = open_store();

    assert_eq!(store.product_count().unwrap(), 0);
    assert!(store.load_catalog().unwrap().is_empty());
}

#[test]
fn save_then_load_preserves_inputs_and_order() {
    let store = open_store();
    let mut catalog = Catalog::from_products(vec![
        reference_product("a"),
        reference_product("b"),
    ])
    .unwrap();
    let added = catalog.add_product(90.0);
    catalog.move_product(&added, 0).unwrap();
    catalog.update_product("b", |p| {
        p.sku = "EDITED".into();
        p.returns_rate_percent = 12.5;
    })
    .unwrap();

    store.save_catalog(&catalog).unwrap();
    let loaded = store.load_catalog().unwrap();

    assert_eq!(loaded, catalog);
    assert_eq!(store.product_count().unwrap(), 3);
}

#[test]
fn save_replaces_previous_contents() {
    let store = open_store();
    let mut catalog = Catalog::from_products(vec![
        reference_product("a"),
        reference_product("b"),
    ])
    .unwrap();
    store.save_catalog(&catalog).unwrap();

    catalog.remove_product("a").unwrap();
    store.save_catalog(&catalog).unwrap();

    let loaded = store.load_catalog().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.get("a").is_none());
    assert!(loaded.get("b").is_some());
}

#[test]
fn migrate_is_idempotent() {
    let store = open_store();
    store.migrate().expect("second migration");
}

/// A second raw connection onto the same shared in-memory database, for
/// writing rows the catalog API would never produce.
fn shared_store() -> (CatalogStore, rusqlite::Connection) {
    let uri = format!(
        "file:store_test_{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4().simple()
    );
    let store = CatalogStore::open(&uri).expect("shared store");
    store.migrate().expect("migration");
    let raw = rusqlite::Connection::open_with_flags(
        &uri,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_URI,
    )
    .expect("raw connection");
    (store, raw)
}

fn insert_raw_row(raw: &rusqlite::Connection, units_required: i64, monthly_units: i64) {
    raw.execute(
        "INSERT INTO product_input (
            id, position, sku, units_required, unit_price_usd, fx_rate,
            shipping_and_customs_inr, packaging_inr, selling_price_inr,
            pick_and_pack_fee, shipping_weight_fee, storage_fee,
            returns_rate_percent, est_monthly_sales_units, ads_cost_percent,
            monthly_fixed_costs, updated_at
        ) VALUES ('raw', 0, 'RAW', ?1, 2.0, 90.0, 29.0, 20.0, 659.0,
                  17.0, 65.0, 5.0, 7.0, ?2, 10.0, 1000.0, '2026-01-01T00:00:00Z')",
        rusqlite::params![units_required, monthly_units],
    )
    .expect("insert raw row");
}

#[test]
fn load_rejects_negative_unit_counts() {
    let (store, raw) = shared_store();
    insert_raw_row(&raw, -1, 200);

    assert!(matches!(
        store.load_catalog(),
        Err(DeskError::Database(_))
    ));
}

#[test]
fn load_rejects_unit_counts_beyond_u32() {
    let (store, raw) = shared_store();
    insert_raw_row(&raw, 500, 5_000_000_000);

    assert!(matches!(
        store.load_catalog(),
        Err(DeskError::Database(_))
    ));
}

#[test]
fn load_accepts_in_range_raw_row() {
    let (store, raw) = shared_store();
    insert_raw_row(&raw, 500, 200);

    let loaded = store.load_catalog().unwrap();
    let p = loaded.get("raw").unwrap();
    assert_eq!(p.units_required, 500);
    assert_eq!(p.est_monthly_sales_units, 200);
}
