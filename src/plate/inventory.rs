//! Plate supply and the working inventory for one allocation

use super::catalog::Denomination;
use super::weight::Weight;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Standard Olympic bar weight in pounds
pub const DEFAULT_BAR_WEIGHT: i64 = 45;

/// Pairs of each plate assumed when the caller does not list equipment
pub const DEFAULT_PAIRS: u32 = 10;

/// Pair counts for every denomination, indexed in catalog order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PlateFields", into = "PlateFields")]
pub struct PlateCounts([u32; Denomination::COUNT]);

impl PlateCounts {
    /// No plates at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The same number of pairs for every denomination
    pub fn uniform(pairs: u32) -> Self {
        Self([pairs; Denomination::COUNT])
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        self.0[denomination.index()]
    }

    pub fn set(&mut self, denomination: Denomination, pairs: u32) {
        self.0[denomination.index()] = pairs;
    }

    /// Builder form of [`PlateCounts::set`]
    pub fn with(mut self, denomination: Denomination, pairs: u32) -> Self {
        self.set(denomination, pairs);
        self
    }

    /// Remove up to `pairs` pairs, returning how many were actually removed
    pub fn take_up_to(&mut self, denomination: Denomination, pairs: u32) -> u32 {
        let slot = &mut self.0[denomination.index()];
        let taken = pairs.min(*slot);
        *slot -= taken;
        taken
    }

    /// Non-zero and zero counts alike, heaviest first
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Weight of every listed pair combined
    pub fn total_weight(&self) -> Weight {
        self.iter()
            .map(|(d, pairs)| d.pair_weight().times(pairs))
            .fold(Weight::ZERO, |acc, w| acc + w)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&pairs| pairs == 0)
    }
}

impl Index<Denomination> for PlateCounts {
    type Output = u32;

    fn index(&self, denomination: Denomination) -> &u32 {
        &self.0[denomination.index()]
    }
}

impl FromIterator<(Denomination, u32)> for PlateCounts {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |counts, (d, pairs)| counts.with(d, pairs))
    }
}

/// Wire shape of [`PlateCounts`]: one optional field per plate, zeros elided
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlateFields {
    #[serde(rename = "hundreds", skip_serializing_if = "is_zero")]
    hundos: u32,
    #[serde(skip_serializing_if = "is_zero")]
    forty_fives: u32,
    #[serde(skip_serializing_if = "is_zero")]
    thirty_fives: u32,
    #[serde(skip_serializing_if = "is_zero")]
    twenty_fives: u32,
    #[serde(skip_serializing_if = "is_zero")]
    tens: u32,
    #[serde(skip_serializing_if = "is_zero")]
    fives: u32,
    #[serde(skip_serializing_if = "is_zero")]
    two_dot_fives: u32,
    #[serde(skip_serializing_if = "is_zero")]
    one_dot_two_fives: u32,
}

fn is_zero(pairs: &u32) -> bool {
    *pairs == 0
}

impl From<PlateFields> for PlateCounts {
    fn from(f: PlateFields) -> Self {
        Self([
            f.hundos,
            f.forty_fives,
            f.thirty_fives,
            f.twenty_fives,
            f.tens,
            f.fives,
            f.two_dot_fives,
            f.one_dot_two_fives,
        ])
    }
}

impl From<PlateCounts> for PlateFields {
    fn from(counts: PlateCounts) -> Self {
        let [hundos, forty_fives, thirty_fives, twenty_fives, tens, fives, two_dot_fives, one_dot_two_fives] =
            counts.0;
        Self {
            hundos,
            forty_fives,
            thirty_fives,
            twenty_fives,
            tens,
            fives,
            two_dot_fives,
            one_dot_two_fives,
        }
    }
}

/// Everything the allocator needs for one run
///
/// Counts are pairs. The allocator works on its own copy and decrements
/// `available` as plates are loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Inventory {
    pub bar_weight: i64,
    pub target: i64,
    pub available: PlateCounts,
}

impl Inventory {
    pub fn new(bar_weight: i64, target: i64, available: PlateCounts) -> Self {
        Self {
            bar_weight,
            target,
            available,
        }
    }
}

/// A bar plus the plates on hand, used when requests omit their own
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub bar_weight: i64,
    pub plates: PlateCounts,
}

impl Equipment {
    pub fn new(bar_weight: i64, plates: PlateCounts) -> Self {
        Self { bar_weight, plates }
    }

    /// A 45 lb bar with ten pairs of every plate
    pub fn standard() -> Self {
        Self::new(DEFAULT_BAR_WEIGHT, PlateCounts::uniform(DEFAULT_PAIRS))
    }

    /// Inventory for loading this equipment up to `target`
    pub fn inventory(&self, target: i64) -> Inventory {
        Inventory::new(self.bar_weight, target, self.plates)
    }

    /// Whether an inventory is exactly this equipment
    pub fn matches(&self, inventory: &Inventory) -> bool {
        inventory.bar_weight == self.bar_weight && inventory.available == self.plates
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_never_goes_below_zero() {
        let mut counts = PlateCounts::empty().with(Denomination::Tens, 3);
        assert_eq!(counts.take_up_to(Denomination::Tens, 2), 2);
        assert_eq!(counts.take_up_to(Denomination::Tens, 5), 1);
        assert_eq!(counts.take_up_to(Denomination::Tens, 1), 0);
        assert_eq!(counts[Denomination::Tens], 0);
    }

    #[test]
    fn total_weight_counts_pairs() {
        let counts = PlateCounts::empty()
            .with(Denomination::FortyFives, 2)
            .with(Denomination::OneDotTwoFives, 1);
        assert_eq!(counts.total_weight(), Weight::from_quarters(4 * 180 + 10));
    }

    #[test]
    fn serialization_elides_zero_counts() {
        let counts = PlateCounts::empty().with(Denomination::FortyFives, 2);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"fortyFives":2}"#);
    }

    #[test]
    fn deserialization_defaults_missing_counts_to_zero() {
        let counts: PlateCounts =
            serde_json::from_str(r#"{"hundreds":1,"oneDotTwoFives":3}"#).unwrap();
        assert_eq!(
            counts,
            PlateCounts::empty()
                .with(Denomination::Hundos, 1)
                .with(Denomination::OneDotTwoFives, 3)
        );
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(serde_json::from_str::<PlateCounts>(r#"{"tens":-1}"#).is_err());
    }

    #[test]
    fn standard_equipment_matches_its_own_inventory() {
        let equipment = Equipment::standard();
        assert!(equipment.matches(&equipment.inventory(225)));
        let mut other = equipment.inventory(225);
        other.available.take_up_to(Denomination::Fives, 1);
        assert!(!equipment.matches(&other));
    }
}
