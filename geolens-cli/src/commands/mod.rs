//! CLI subcommands.

pub mod project;
pub mod simulate;
