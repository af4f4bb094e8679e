//! Enriched product: a catalog entry paired with its derived metrics.

use crate::{
    fee_schedule::FeeSchedule,
    metrics::{derive_metrics, CalculatedMetrics, ProductInput},
    types::ProductId,
};
use serde::{Deserialize, Serialize};

/// An immutable view combining one `ProductInput` with the metrics
/// derived from it. Built on read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    input:   ProductInput,
    metrics: CalculatedMetrics,
}

impl Product {
    pub fn enrich(input: ProductInput, fees: &FeeSchedule) -> Self {
        let metrics = derive_metrics(&input, fees);
        Self { input, metrics }
    }

    pub fn id(&self) -> &ProductId {
        &self.input.id
    }

    pub fn input(&self) -> &ProductInput {
        &self.input
    }

    pub fn metrics(&self) -> &CalculatedMetrics {
        &self.metrics
    }
}
