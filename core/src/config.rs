use crate::{
    fee_schedule::FeeSchedule,
    metrics::ProductInput,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct SeedCatalogFile {
    default_fx_rate: f64,
    products:        Vec<ProductInput>,
}

#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub fee_schedule:    FeeSchedule,
    /// FX rate given to newly added products.
    pub default_fx_rate: f64,
    /// Written to an empty store on first run.
    pub seed_products:   Vec<ProductInput>,
}

impl DeskConfig {
    /// Load from the data/ directory.
    /// In tests, use DeskConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let fee_path = format!("{data_dir}/fees/fee_schedule.json");
        let fee_content = std::fs::read_to_string(&fee_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {fee_path}: {e}"))?;
        let fee_schedule: FeeSchedule = serde_json::from_str(&fee_content)?;
        fee_schedule.validate()?;

        let seed_path = format!("{data_dir}/catalog/seed_catalog.json");
        let seed_content = std::fs::read_to_string(&seed_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {seed_path}: {e}"))?;
        let seed_file: SeedCatalogFile = serde_json::from_str(&seed_content)?;

        if !(seed_file.default_fx_rate > 0.0) {
            anyhow::bail!(
                "{seed_path}: default_fx_rate must be positive, got {}",
                seed_file.default_fx_rate
            );
        }

        log::info!(
            "config: loaded fee schedule ({} closing tiers) and {} seed products",
            fee_schedule.closing_fee_tiers.len(),
            seed_file.products.len()
        );

        Ok(Self {
            fee_schedule,
            default_fx_rate: seed_file.default_fx_rate,
            seed_products: seed_file.products,
        })
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            fee_schedule:    FeeSchedule::standard(),
            default_fx_rate: 90.0,
            seed_products:   vec![reference_product("sku-reference")],
        }
    }
}

/// The fixed regression product: a 659 INR item sourced at 2 USD.
pub fn reference_product(id: &str) -> ProductInput {
    ProductInput {
        id:                       id.to_string(),
        sku:                      "REF-659".into(),
        units_required:           500,
        unit_price_usd:           2.0,
        fx_rate:                  90.0,
        shipping_and_customs_inr: 29.0,
        packaging_inr:            20.0,
        selling_price_inr:        659.0,
        pick_and_pack_fee:        17.0,
        shipping_weight_fee:      65.0,
        storage_fee:              5.0,
        returns_rate_percent:     7.0,
        est_monthly_sales_units:  200,
        ads_cost_percent:         10.0,
        monthly_fixed_costs:      1000.0,
    }
}
