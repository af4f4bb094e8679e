//! Fee schedule: the marketplace's fee and tax policy as data.
//!
//! The metrics engine asks this module for fee amounts and never
//! hard-codes a rate or a tier boundary itself. Swapping the policy
//! means loading a different schedule, not editing the engine.

use crate::{
    error::{DeskError, DeskResult},
    types::Inr,
};
use serde::{Deserialize, Serialize};

/// One band of the closing-fee step function.
///
/// `up_to` is the inclusive upper bound of the band; `None` marks the
/// open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingFeeTier {
    pub up_to: Option<Inr>,
    pub fee:   Inr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Prices strictly below this pay no referral fee.
    pub referral_threshold: Inr,
    pub referral_rate:      f64,
    /// Ordered by ascending `up_to`; the last tier is unbounded.
    pub closing_fee_tiers:  Vec<ClosingFeeTier>,
    /// GST charged on the marketplace's own fees.
    pub fee_gst_rate:       f64,
    /// GST charged on the sale price.
    pub sale_gst_rate:      f64,
}

impl FeeSchedule {
    /// The marketplace's current published policy.
    pub fn standard() -> Self {
        Self {
            referral_threshold: 300.0,
            referral_rate:      0.105,
            closing_fee_tiers:  vec![
                ClosingFeeTier { up_to: Some(500.0),  fee: 13.0 },
                ClosingFeeTier { up_to: Some(1000.0), fee: 26.0 },
                ClosingFeeTier { up_to: None,         fee: 71.0 },
            ],
            fee_gst_rate:       0.18,
            sale_gst_rate:      0.05,
        }
    }

    pub fn referral_fee(&self, selling_price: Inr) -> Inr {
        if selling_price < self.referral_threshold {
            0.0
        } else {
            selling_price * self.referral_rate
        }
    }

    pub fn closing_fee(&self, selling_price: Inr) -> Inr {
        self.closing_fee_tiers
            .iter()
            .find(|tier| tier.up_to.map_or(true, |bound| selling_price <= bound))
            .map(|tier| tier.fee)
            // A validated schedule always ends with an open tier.
            .unwrap_or(0.0)
    }

    pub fn gst_on_fees(&self, sum_fees: Inr) -> Inr {
        sum_fees * self.fee_gst_rate
    }

    pub fn gst_on_sale(&self, selling_price: Inr) -> Inr {
        selling_price * self.sale_gst_rate
    }

    /// Check the schedule is usable as a total step function.
    pub fn validate(&self) -> DeskResult<()> {
        let invalid = |reason: String| Err(DeskError::InvalidFeeSchedule { reason });

        for (name, value) in [
            ("referral_threshold", self.referral_threshold),
            ("referral_rate", self.referral_rate),
            ("fee_gst_rate", self.fee_gst_rate),
            ("sale_gst_rate", self.sale_gst_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        if self.closing_fee_tiers.is_empty() {
            return invalid("closing_fee_tiers is empty".into());
        }

        let last = self.closing_fee_tiers.len() - 1;
        let mut previous: Option<Inr> = None;
        for (i, tier) in self.closing_fee_tiers.iter().enumerate() {
            if !tier.fee.is_finite() || tier.fee < 0.0 {
                return invalid(format!("closing fee tier {i} has invalid fee {}", tier.fee));
            }
            match tier.up_to {
                None if i != last => {
                    return invalid(format!("unbounded closing fee tier {i} is not the last tier"));
                }
                None => {}
                Some(_) if i == last => {
                    return invalid("last closing fee tier must be unbounded".into());
                }
                Some(bound) => {
                    if let Some(prev) = previous {
                        if bound <= prev {
                            return invalid(format!(
                                "closing fee tier bounds must ascend: {bound} follows {prev}"
                            ));
                        }
                    }
                    previous = Some(bound);
                }
            }
        }

        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
