//! Command line interface

pub mod args;
pub mod commands;
mod output;

pub use args::{Cli, Commands};
