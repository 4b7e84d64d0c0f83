//! Canonical cache keys for allocation requests
//!
//! A key encodes every input that changes the allocator's answer. Requests
//! that use the configured equipment unchanged share the short `get:<target>`
//! form; anything else spells out the bar and all eight pair counts.

use crate::plate::{Equipment, Inventory};
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for an inventory, shortened when it is exactly `equipment`
    pub fn for_inventory(inventory: &Inventory, equipment: &Equipment) -> Self {
        if equipment.matches(inventory) {
            Self::for_target(inventory.target)
        } else {
            Self::explicit(inventory)
        }
    }

    /// Key for a target loaded with the configured equipment
    pub fn for_target(target: i64) -> Self {
        Self(format!("get:{}", target))
    }

    /// Fully spelled out key, heaviest plate first
    pub fn explicit(inventory: &Inventory) -> Self {
        let mut key = format!(
            "post:bar={}:desired={}",
            inventory.bar_weight, inventory.target
        );
        for (denomination, pairs) in inventory.available.iter() {
            // Writing to a String cannot fail
            let _ = write!(key, ":{}={}", denomination.label(), pairs);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> String {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::{Denomination, PlateCounts};

    #[test]
    fn explicit_key_lists_every_count_in_order() {
        let available = PlateCounts::empty()
            .with(Denomination::Hundos, 1)
            .with(Denomination::FortyFives, 4)
            .with(Denomination::OneDotTwoFives, 2);
        let key = CacheKey::explicit(&Inventory::new(45, 315, available));
        assert_eq!(
            key.as_str(),
            "post:bar=45:desired=315:h=1:45=4:35=0:25=0:10=0:5=0:2.5=0:1.25=2"
        );
    }

    #[test]
    fn default_equipment_uses_short_key() {
        let equipment = Equipment::standard();
        let key = CacheKey::for_inventory(&equipment.inventory(225), &equipment);
        assert_eq!(key.as_str(), "get:225");
    }

    #[test]
    fn custom_equipment_uses_explicit_key() {
        let equipment = Equipment::standard();
        let inventory = Inventory::new(35, 225, equipment.plates);
        let key = CacheKey::for_inventory(&inventory, &equipment);
        assert!(key.as_str().starts_with("post:bar=35:desired=225:"));
    }

    #[test]
    fn distinct_inventories_never_share_a_key() {
        let base = Inventory::new(45, 200, PlateCounts::uniform(2));
        let mut keys = vec![CacheKey::explicit(&base)];
        for d in Denomination::ALL {
            let mut changed = base;
            changed.available.take_up_to(d, 1);
            keys.push(CacheKey::explicit(&changed));
        }
        keys.push(CacheKey::explicit(&Inventory { bar_weight: 35, ..base }));
        keys.push(CacheKey::explicit(&Inventory { target: 201, ..base }));

        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
