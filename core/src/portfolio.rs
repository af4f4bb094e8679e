//! Portfolio aggregator: rolls enriched products into catalog KPIs.
//!
//! This module is PURE. Every KPI is a reduction over the product
//! list and does not depend on its order. An empty list yields zero
//! totals and a not-applicable payback.

use crate::{
    numeric::{percent_of, ratio, safe_divide, stable_sum},
    product::Product,
    types::{Inr, Percent, DAYS_PER_MONTH},
};
use serde::{Deserialize, Serialize};

/// Months of take-home profit needed to recover the inventory
/// investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Payback {
    Months(f64),
    /// Monthly take-home is zero or negative; the stock never pays back.
    NotApplicable,
}

impl Payback {
    pub fn months(&self) -> Option<f64> {
        match self {
            Payback::Months(m) => Some(*m),
            Payback::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Payback::Months(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioKpis {
    // Investment view: current stock valued at units_required
    pub total_inventory_value:             Inr,
    pub total_inventory_revenue:           Inr,
    pub total_inventory_gross_profit:      Inr,
    pub total_inventory_gross_margin:      Percent,
    pub total_inventory_net_profit:        Inr,
    pub total_inventory_net_margin:        Percent,
    // Monthly run-rate view
    pub total_monthly_revenue:             Inr,
    pub total_monthly_cogs:                Inr,
    pub total_monthly_take_home:           Inr,
    // Efficiency
    pub days_of_inventory:                 f64,
    pub contribution_margin_percent:       Percent,
    pub months_to_payback:                 Payback,
}

pub fn aggregate_portfolio(products: &[Product]) -> PortfolioKpis {
    let units = |p: &Product| f64::from(p.input().units_required);
    let monthly_units = |p: &Product| f64::from(p.input().est_monthly_sales_units);

    // ── Investment ─────────────────────────────────────────────

    let total_inventory_value =
        stable_sum(products.iter().map(|p| p.metrics().landed_cogs * units(p)));

    let total_inventory_revenue =
        stable_sum(products.iter().map(|p| p.input().selling_price_inr * units(p)));

    let total_inventory_gross_profit = stable_sum(products.iter().map(|p| {
        (p.input().selling_price_inr - p.metrics().landed_cogs) * units(p)
    }));
    let total_inventory_gross_margin =
        percent_of(total_inventory_gross_profit, total_inventory_revenue);

    let total_inventory_net_profit =
        stable_sum(products.iter().map(|p| p.metrics().real_net_profit * units(p)));
    let total_inventory_net_margin =
        percent_of(total_inventory_net_profit, total_inventory_revenue);

    // ── Monthly run-rate ───────────────────────────────────────

    let total_monthly_revenue =
        stable_sum(products.iter().map(|p| p.metrics().monthly_revenue));

    let total_monthly_cogs =
        stable_sum(products.iter().map(|p| p.metrics().landed_cogs * monthly_units(p)));

    let total_monthly_take_home =
        stable_sum(products.iter().map(|p| p.metrics().total_monthly_take_home));

    // ── Efficiency ─────────────────────────────────────────────

    let days_of_inventory =
        safe_divide(total_inventory_value, total_monthly_cogs, 0.0) * DAYS_PER_MONTH;

    // Before ads and overhead.
    let total_monthly_contribution = stable_sum(products.iter().map(|p| {
        let m = p.metrics();
        let variable_cost_per_unit = m.landed_cogs + m.total_mkt_fees_per_unit + m.gst_on_sale;
        let contribution_per_unit = p.input().selling_price_inr - variable_cost_per_unit;
        contribution_per_unit * monthly_units(p)
    }));
    let contribution_margin_percent =
        percent_of(total_monthly_contribution, total_monthly_revenue);

    let months_to_payback = ratio(total_inventory_value, total_monthly_take_home)
        .map_or(Payback::NotApplicable, Payback::Months);

    log::debug!(
        "portfolio: {} products value={:.2} take_home={:.2}/mo doi={:.1} payback={:?}",
        products.len(),
        total_inventory_value,
        total_monthly_take_home,
        days_of_inventory,
        months_to_payback
    );

    PortfolioKpis {
        total_inventory_value,
        total_inventory_revenue,
        total_inventory_gross_profit,
        total_inventory_gross_margin,
        total_inventory_net_profit,
        total_inventory_net_margin,
        total_monthly_revenue,
        total_monthly_cogs,
        total_monthly_take_home,
        days_of_inventory,
        contribution_margin_percent,
        months_to_payback,
    }
}
