//! Metrics derivation engine: one product's inputs to its full
//! per-unit cost and profit breakdown.
//!
//! This module is PURE. No validation, no I/O, no dependency on any
//! other product. Out-of-range inputs propagate arithmetically; every
//! ratio with a non-positive denominator reports 0.

use crate::{
    fee_schedule::FeeSchedule,
    numeric::{percent_of, safe_divide},
    types::{Inr, Percent, ProductId},
};
use serde::{Deserialize, Serialize};

/// One catalog entry as the seller edits it.
///
/// Field names serialize in camelCase to stay compatible with catalogs
/// exported by the browser front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub id:  ProductId,
    pub sku: String,

    // Sourcing
    pub units_required:           u32,
    #[serde(rename = "unitPriceUSD")]
    pub unit_price_usd:           f64,
    /// Local currency units per USD.
    pub fx_rate:                  f64,
    pub shipping_and_customs_inr: Inr,
    pub packaging_inr:            Inr,

    // Pricing
    pub selling_price_inr: Inr,

    // Marketplace cost inputs, per unit
    pub pick_and_pack_fee:    Inr,
    pub shipping_weight_fee:  Inr,
    pub storage_fee:          Inr,
    pub returns_rate_percent: Percent,

    // Operations
    pub est_monthly_sales_units: u32,
    pub ads_cost_percent:        Percent,
    pub monthly_fixed_costs:     Inr,
}

impl ProductInput {
    /// A blank entry: everything zero except the FX rate.
    pub fn blank(id: ProductId, sku: impl Into<String>, fx_rate: f64) -> Self {
        Self {
            id,
            sku: sku.into(),
            units_required: 0,
            unit_price_usd: 0.0,
            fx_rate,
            shipping_and_customs_inr: 0.0,
            packaging_inr: 0.0,
            selling_price_inr: 0.0,
            pick_and_pack_fee: 0.0,
            shipping_weight_fee: 0.0,
            storage_fee: 0.0,
            returns_rate_percent: 0.0,
            est_monthly_sales_units: 0,
            ads_cost_percent: 0.0,
            monthly_fixed_costs: 0.0,
        }
    }
}

/// Everything derived from a `ProductInput`. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    pub unit_price_inr: Inr,
    pub landed_cogs:    Inr,

    pub gross_profit:        Inr,
    pub gross_profit_margin: Percent,

    pub referral_fee:      Inr,
    pub fixed_closing_fee: Inr,
    pub gst_on_mkt_fee:    Inr,
    pub gst_on_sale:       Inr,
    pub returns_cost:      Inr,

    pub total_mkt_fees_per_unit: Inr,
    pub total_mkt_fees_percent:  Percent,

    pub monthly_revenue:     Inr,
    pub ads_cost_per_unit:   Inr,
    pub overhead_per_unit:   Inr,
    pub total_cost_per_unit: Inr,

    pub real_net_profit:        Inr,
    pub real_net_profit_margin: Percent,
    pub total_monthly_take_home: Inr,
    pub roi:                    Percent,
}

/// Derive the full breakdown for one product under `fees`.
pub fn derive_metrics(input: &ProductInput, fees: &FeeSchedule) -> CalculatedMetrics {
    let price = input.selling_price_inr;
    let monthly_units = f64::from(input.est_monthly_sales_units);

    // ── Landed cost ────────────────────────────────────────────

    let unit_price_inr = input.unit_price_usd * input.fx_rate;
    let landed_cogs = unit_price_inr + input.shipping_and_customs_inr + input.packaging_inr;

    let gross_profit = price - landed_cogs;
    let gross_profit_margin = percent_of(gross_profit, price);

    // ── Marketplace fees ───────────────────────────────────────

    let referral_fee = fees.referral_fee(price);
    let fixed_closing_fee = fees.closing_fee(price);

    let sum_fees = referral_fee
        + fixed_closing_fee
        + input.pick_and_pack_fee
        + input.shipping_weight_fee
        + input.storage_fee;

    let gst_on_mkt_fee = fees.gst_on_fees(sum_fees);
    let gst_on_sale = fees.gst_on_sale(price);

    // A return refunds the price and forfeits the referral fee already paid.
    let returns_cost = (price + referral_fee) * (input.returns_rate_percent / 100.0);

    let total_mkt_fees_per_unit = sum_fees + gst_on_mkt_fee + returns_cost;
    let total_mkt_fees_percent = percent_of(total_mkt_fees_per_unit, price);

    // ── Operations ─────────────────────────────────────────────

    let monthly_revenue = monthly_units * price;
    let ads_cost_per_unit = price * (input.ads_cost_percent / 100.0);
    let overhead_per_unit = safe_divide(input.monthly_fixed_costs, monthly_units, 0.0);

    // ── Bottom line ────────────────────────────────────────────

    let total_cost_per_unit =
        landed_cogs + total_mkt_fees_per_unit + gst_on_sale + ads_cost_per_unit + overhead_per_unit;

    let real_net_profit = price - total_cost_per_unit;
    let real_net_profit_margin = percent_of(real_net_profit, price);
    let total_monthly_take_home = real_net_profit * monthly_units;
    let roi = percent_of(real_net_profit, landed_cogs);

    log::debug!(
        "metrics: {} net={:.2}/unit margin={:.2}% roi={:.2}%",
        input.id, real_net_profit, real_net_profit_margin, roi
    );

    CalculatedMetrics {
        unit_price_inr,
        landed_cogs,
        gross_profit,
        gross_profit_margin,
        referral_fee,
        fixed_closing_fee,
        gst_on_mkt_fee,
        gst_on_sale,
        returns_cost,
        total_mkt_fees_per_unit,
        total_mkt_fees_percent,
        monthly_revenue,
        ads_cost_per_unit,
        overhead_per_unit,
        total_cost_per_unit,
        real_net_profit,
        real_net_profit_margin,
        total_monthly_take_home,
        roi,
    }
}
