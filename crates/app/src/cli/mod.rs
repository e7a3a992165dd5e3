//! CLI subcommands.

pub mod products;
pub mod seed;
