//! CLI command handlers, one file per subcommand.

mod config;
mod parse;
mod stringify;

pub use config::run_config;
pub use parse::run_parse;
pub use stringify::run_stringify;
