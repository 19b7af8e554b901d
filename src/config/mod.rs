#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ApplyArgs, CliConfig, Command, CoursesArgs, OutputFormat};
pub use toml_config::FinderConfig;
