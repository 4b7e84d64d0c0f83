//! Request handling around the allocator
//!
//! Turns untrusted input into an [`Inventory`], answers from the cache when
//! it can, and computes and stores the result when it cannot.

use crate::cache::{CacheKey, ResultCache};
use crate::error::{RackError, RackResult};
use crate::plate::{self, Allocation, Equipment, Inventory, PlateCounts};
use serde::Deserialize;
use tracing::{debug, error};

/// Caller-supplied bar, target, and plate supply
///
/// Omitted plate counts mean none of that plate is available. A zero or
/// omitted bar weight falls back to the configured bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackRequest {
    #[serde(default)]
    pub bar_weight: i64,
    #[serde(flatten)]
    pub plates: PlateCounts,
    #[serde(default)]
    pub desired_weight: i64,
}

impl RackRequest {
    pub fn new(bar_weight: i64, desired_weight: i64, plates: PlateCounts) -> Self {
        Self {
            bar_weight,
            plates,
            desired_weight,
        }
    }

    /// Validate and fill defaults from `equipment`
    pub fn into_inventory(self, equipment: &Equipment) -> RackResult<Inventory> {
        let bar_weight = match self.bar_weight {
            0 => equipment.bar_weight,
            bar => bar,
        };
        if bar_weight < 0 {
            return Err(RackError::invalid("bar weight cannot be negative"));
        }
        if self.desired_weight <= 0 {
            return Err(RackError::invalid("a valid desired weight must be provided"));
        }
        if self.desired_weight <= bar_weight {
            return Err(RackError::invalid(
                "desired weight must be greater than bar weight",
            ));
        }
        Ok(Inventory::new(bar_weight, self.desired_weight, self.plates))
    }
}

/// Allocator behind a shared result cache
pub struct RackService {
    cache: ResultCache,
    equipment: Equipment,
}

impl RackService {
    pub fn new(cache: ResultCache, equipment: Equipment) -> Self {
        Self { cache, equipment }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Allocate with the caller's own plates
    pub async fn rack(&self, request: RackRequest) -> RackResult<Allocation> {
        let inventory = request.into_inventory(&self.equipment)?;
        self.resolve(inventory).await
    }

    /// Allocate with the configured equipment
    pub async fn rack_default(&self, desired_weight: i64) -> RackResult<Allocation> {
        if desired_weight <= 0 {
            return Err(RackError::invalid("'weight' must be a positive integer"));
        }
        if desired_weight <= self.equipment.bar_weight {
            return Err(RackError::invalid(
                "desired weight must be greater than bar weight",
            ));
        }
        self.resolve(self.equipment.inventory(desired_weight)).await
    }

    async fn resolve(&self, inventory: Inventory) -> RackResult<Allocation> {
        let key = CacheKey::for_inventory(&inventory, &self.equipment);

        if let Some(cached) = self.cache.get(key.as_str()).await {
            debug!("Cache hit for {}", key);
            return Ok(cached);
        }
        debug!("Cache miss for {}", key);

        let allocation = plate::compute(inventory).inspect_err(|e| {
            error!("Error calculating weight: {} (input: {:?})", e, inventory);
        })?;

        self.cache.set(key, allocation.clone()).await;
        Ok(allocation)
    }
}
