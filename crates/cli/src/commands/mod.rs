//! CLI subcommands.

pub mod hash_password;
pub mod migrate;
