//! Settings are read from a TOML file; `--settings <path>` overrides the
//! build-profile default.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
