//! Exact plate arithmetic
//!
//! Weights are held in quarter pounds so 1.25 lb plates add up without
//! floating point drift.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const QUARTERS_PER_POUND: i64 = 4;

/// A weight in pounds, stored as whole quarter pounds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(i64);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    /// Whole pounds, saturating at the representable range
    pub const fn from_lbs(lbs: i64) -> Self {
        Weight(lbs.saturating_mul(QUARTERS_PER_POUND))
    }

    pub const fn from_quarters(quarters: i64) -> Self {
        Weight(quarters)
    }

    pub fn quarters(&self) -> i64 {
        self.0
    }

    pub fn as_lbs(&self) -> f64 {
        self.0 as f64 / QUARTERS_PER_POUND as f64
    }

    pub fn is_whole(&self) -> bool {
        self.0 % QUARTERS_PER_POUND == 0
    }

    pub fn times(self, count: u32) -> Self {
        Weight(self.0.saturating_mul(i64::from(count)))
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Weight {
    fn add_assign(&mut self, rhs: Weight) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Weight {
    fn sub_assign(&mut self, rhs: Weight) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / QUARTERS_PER_POUND)
        } else {
            write!(f, "{}", self.as_lbs())
        }
    }
}

/// Whole weights serialize as integers, fractional ones as floats
impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 / QUARTERS_PER_POUND)
        } else {
            serializer.serialize_f64(self.as_lbs())
        }
    }
}
