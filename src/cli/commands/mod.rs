//! CLI command implementations

pub mod calc;
pub mod config;
pub mod serve;

pub use calc::execute as calc;
pub use config::execute as config;
pub use serve::execute as serve;
