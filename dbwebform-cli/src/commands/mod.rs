//! CLI command implementations

pub mod generate;
pub mod serve;

pub use generate::GenerateCommand;
pub use serve::ServeCommand;
