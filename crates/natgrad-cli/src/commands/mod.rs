//! CLI command implementations.

pub mod blocks;
pub mod common;
pub mod generators;
pub mod layers;
