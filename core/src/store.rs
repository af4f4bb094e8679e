//! SQLite persistence layer for the catalog.
//!
//! RULE: Only store.rs talks to the database.
//! Only product inputs are written; metrics are never persisted.

use crate::{catalog::Catalog, error::DeskResult, metrics::ProductInput};
use rusqlite::{params, Connection};

pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open (or create) the catalog database at `path`.
    pub fn open(path: &str) -> DeskResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only applies to real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_catalog.sql"))?;
        Ok(())
    }

    // ── Catalog ────────────────────────────────────────────────

    /// Replace the stored catalog with `catalog`, preserving its order.
    pub fn save_catalog(&self, catalog: &Catalog) -> DeskResult<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM product_input", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO product_input (
                    id, position, sku, units_required, unit_price_usd, fx_rate,
                    shipping_and_customs_inr, packaging_inr, selling_price_inr,
                    pick_and_pack_fee, shipping_weight_fee, storage_fee,
                    returns_rate_percent, est_monthly_sales_units, ads_cost_percent,
                    monthly_fixed_costs, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            )?;
            for (position, p) in catalog.iter().enumerate() {
                stmt.execute(params![
                    p.id,
                    position as i64,
                    p.sku,
                    i64::from(p.units_required),
                    p.unit_price_usd,
                    p.fx_rate,
                    p.shipping_and_customs_inr,
                    p.packaging_inr,
                    p.selling_price_inr,
                    p.pick_and_pack_fee,
                    p.shipping_weight_fee,
                    p.storage_fee,
                    p.returns_rate_percent,
                    i64::from(p.est_monthly_sales_units),
                    p.ads_cost_percent,
                    p.monthly_fixed_costs,
                    updated_at,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("store: saved {} products", catalog.len());
        Ok(())
    }

    /// Load the stored catalog in saved order.
    pub fn load_catalog(&self) -> DeskResult<Catalog> {
        let mut stmt = self.conn.prepare(
            "SELECT id, sku, units_required, unit_price_usd, fx_rate,
                    shipping_and_customs_inr, packaging_inr, selling_price_inr,
                    pick_and_pack_fee, shipping_weight_fee, storage_fee,
                    returns_rate_percent, est_monthly_sales_units, ads_cost_percent,
                    monthly_fixed_costs
             FROM product_input ORDER BY position ASC",
        )?;
        let products = stmt
            .query_map([], |row| {
                Ok(ProductInput {
                    id:                       row.get(0)?,
                    sku:                      row.get(1)?,
                    units_required:           row.get::<_, u32>(2)?,
                    unit_price_usd:           row.get(3)?,
                    fx_rate:                  row.get(4)?,
                    shipping_and_customs_inr: row.get(5)?,
                    packaging_inr:            row.get(6)?,
                    selling_price_inr:        row.get(7)?,
                    pick_and_pack_fee:        row.get(8)?,
                    shipping_weight_fee:      row.get(9)?,
                    storage_fee:              row.get(10)?,
                    returns_rate_percent:     row.get(11)?,
                    est_monthly_sales_units:  row.get::<_, u32>(12)?,
                    ads_cost_percent:         row.get(13)?,
                    monthly_fixed_costs:      row.get(14)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("store: loaded {} products", products.len());
        Catalog::from_products(products)
    }

    pub fn product_count(&self) -> DeskResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM product_input", [], |row| row.get(0))?;
        Ok(count)
    }
}
