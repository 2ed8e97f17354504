//! Subcommand implementations.

mod autoplay;
mod generate;

pub use autoplay::Autoplay;
pub use generate::Generate;
