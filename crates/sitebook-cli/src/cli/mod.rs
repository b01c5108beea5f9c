pub mod commands;
pub mod config;
pub mod protocol;

pub use commands::execute;
pub use config::CliConfig;
pub use protocol::{CliCommand, Response};
