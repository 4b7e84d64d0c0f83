//! Greedy plate allocation
//!
//! Loads the heaviest pair that still fits, then rescans from the top.
//! With bounded supply this is not always the heaviest reachable load:
//! spending a heavy pair early can strand a gap that lighter plates could
//! have closed. Existing results depend on that behaviour, so it stays.

use super::catalog::Denomination;
use super::inventory::{Inventory, PlateCounts};
use super::weight::Weight;
use crate::error::{RackError, RackResult};
use serde::Serialize;

/// Message attached to every successful allocation
pub const MESSAGE: &str = "You got this!";

/// Plates to load for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub bar_weight: i64,
    #[serde(flatten)]
    pub used: PlateCounts,
    #[serde(rename = "desiredWeight")]
    pub target: i64,
    pub achieved_weight: Weight,
    pub message: String,
}

/// Choose the pairs to load for `inventory`
///
/// A negative bar weight is treated as zero. A target at or below the bar
/// loads nothing.
pub fn compute(mut inventory: Inventory) -> RackResult<Allocation> {
    let bar_weight = inventory.bar_weight.max(0);
    let bar = Weight::from_lbs(bar_weight);

    let mut remaining = Weight::from_lbs(inventory.target) - bar;
    let mut achieved = bar;
    let mut used = PlateCounts::empty();

    // Rescanning from the top after each pair lands on the same plate until
    // it runs out or stops fitting, so each plate is settled in one step.
    for denomination in Denomination::ALL {
        let pair = denomination.pair_weight();
        if pair > remaining {
            continue;
        }
        let fits = u32::try_from(remaining.quarters() / pair.quarters()).unwrap_or(u32::MAX);
        let pairs = inventory.available.take_up_to(denomination, fits);
        used.set(denomination, pairs);
        remaining -= pair.times(pairs);
        achieved += pair.times(pairs);
    }

    let counted = bar + used.total_weight();
    if counted != achieved {
        return Err(RackError::CatalogMismatch {
            counted: counted.as_lbs(),
            achieved: achieved.as_lbs(),
        });
    }

    Ok(Allocation {
        bar_weight,
        used,
        target: inventory.target,
        achieved_weight: achieved,
        message: MESSAGE.to_string(),
    })
}
