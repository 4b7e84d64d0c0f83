//! Rack - barbell plate calculator
//!
//! Picks the plate pairs that bring a bar as close to a target weight as
//! the available plates allow, and serves the answers over HTTP behind a
//! time-bounded cache.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod plate;
pub mod server;
pub mod service;

pub use error::{RackError, RackResult};
