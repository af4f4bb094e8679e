//! profitdesk-core: per-product profitability engine for marketplace
//! sellers.
//!
//! Layering (leaf first):
//!   1. fee_schedule: marketplace fee and tax policy
//!   2. metrics     : ProductInput -> CalculatedMetrics
//!   3. portfolio   : enriched products -> catalog KPIs
//!
//! `catalog`, `store` and `config` are the collaborators around the pure
//! core: an explicit caller-owned product list, its SQLite persistence,
//! and file-based configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fee_schedule;
pub mod metrics;
pub mod numeric;
pub mod portfolio;
pub mod product;
pub mod store;
pub mod types;

pub use catalog::Catalog;
pub use fee_schedule::FeeSchedule;
pub use metrics::{derive_metrics, CalculatedMetrics, ProductInput};
pub use portfolio::{aggregate_portfolio, Payback, PortfolioKpis};
pub use product::Product;
