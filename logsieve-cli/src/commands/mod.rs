//! Command handlers -- one module per subcommand

pub mod config;
pub mod extract;
pub mod rules;
