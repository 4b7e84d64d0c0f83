//! Plate catalog, inventories, and the greedy allocator
//!
//! The allocator is a pure function: it performs no I/O, holds no state,
//! and may be called from any number of tasks at once.

pub mod allocator;
pub mod catalog;
pub mod inventory;
pub mod weight;

pub use allocator::{compute, Allocation, MESSAGE};
pub use catalog::Denomination;
pub use inventory::{Equipment, Inventory, PlateCounts, DEFAULT_BAR_WEIGHT, DEFAULT_PAIRS};
pub use weight::Weight;
