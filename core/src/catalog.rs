//! Catalog store: the caller-owned, ordered list of product inputs.
//!
//! RULE: the catalog holds inputs only. Metrics are derived on every
//! read through `enriched()` / `portfolio()`; nothing derived is cached
//! here.

use crate::{
    error::{DeskError, DeskResult},
    fee_schedule::FeeSchedule,
    metrics::ProductInput,
    portfolio::{aggregate_portfolio, PortfolioKpis},
    product::Product,
    types::ProductId,
};
use uuid::Uuid;

pub const NEW_PRODUCT_SKU: &str = "New Product";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<ProductInput>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an ordered list, rejecting repeated ids.
    pub fn from_products(products: Vec<ProductInput>) -> DeskResult<Self> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Parse the JSON array-of-products document.
    pub fn from_json(json: &str) -> DeskResult<Self> {
        let products: Vec<ProductInput> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    pub fn to_json(&self) -> DeskResult<String> {
        Ok(serde_json::to_string_pretty(&self.products)?)
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductInput> {
        self.products.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ProductInput> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Every entry paired with its freshly derived metrics, in catalog order.
    pub fn enriched(&self, fees: &FeeSchedule) -> Vec<Product> {
        self.products
            .iter()
            .cloned()
            .map(|input| Product::enrich(input, fees))
            .collect()
    }

    pub fn portfolio(&self, fees: &FeeSchedule) -> PortfolioKpis {
        aggregate_portfolio(&self.enriched(fees))
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Append a blank entry with a fresh id and return that id.
    pub fn add_product(&mut self, default_fx_rate: f64) -> ProductId {
        let id = Uuid::new_v4().to_string();
        self.products
            .push(ProductInput::blank(id.clone(), NEW_PRODUCT_SKU, default_fx_rate));
        log::info!("catalog: added {id} ({} products)", self.products.len());
        id
    }

    pub fn insert(&mut self, product: ProductInput) -> DeskResult<()> {
        if self.get(&product.id).is_some() {
            log::warn!("catalog: rejected duplicate id {}", product.id);
            return Err(DeskError::DuplicateProductId { id: product.id });
        }
        self.products.push(product);
        Ok(())
    }

    /// Copy an entry under a new id, placed directly after the original.
    pub fn duplicate_product(&mut self, id: &str) -> DeskResult<ProductId> {
        let index = self.index_of(id)?;
        let mut copy = self.products[index].clone();
        copy.id = Uuid::new_v4().to_string();
        copy.sku = format!("{} (copy)", copy.sku);
        let new_id = copy.id.clone();
        self.products.insert(index + 1, copy);
        log::info!("catalog: duplicated {id} as {new_id}");
        Ok(new_id)
    }

    /// Edit an entry in place. The id is restored if the closure changes it.
    pub fn update_product<F>(&mut self, id: &str, edit: F) -> DeskResult<()>
    where
        F: FnOnce(&mut ProductInput),
    {
        let index = self.index_of(id)?;
        let product = &mut self.products[index];
        edit(product);
        if product.id != id {
            log::warn!("catalog: ignoring id change {id} -> {}", product.id);
            product.id = id.to_string();
        }
        log::debug!("catalog: updated {id}");
        Ok(())
    }

    /// Replace an entry wholesale, keeping its id and position.
    pub fn replace_product(&mut self, id: &str, input: ProductInput) -> DeskResult<()> {
        self.update_product(id, |p| *p = input)
    }

    pub fn remove_product(&mut self, id: &str) -> DeskResult<ProductInput> {
        let index = self.index_of(id)?;
        let removed = self.products.remove(index);
        log::info!("catalog: removed {id} ({} products)", self.products.len());
        Ok(removed)
    }

    /// Move an entry so that it ends up at `to_position`.
    pub fn move_product(&mut self, id: &str, to_position: usize) -> DeskResult<()> {
        let from = self.index_of(id)?;
        if to_position >= self.products.len() {
            log::warn!("catalog: move of {id} to {to_position} out of range");
            return Err(DeskError::PositionOutOfRange {
                position: to_position,
                len:      self.products.len(),
            });
        }
        let product = self.products.remove(from);
        self.products.insert(to_position, product);
        log::debug!("catalog: moved {id} {from} -> {to_position}");
        Ok(())
    }

    fn index_of(&self, id: &str) -> DeskResult<usize> {
        self.position(id).ok_or_else(|| {
            log::warn!("catalog: unknown product {id}");
            DeskError::ProductNotFound { id: id.to_string() }
        })
    }
}
