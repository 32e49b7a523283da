//! Command-line front end shared by the `scout_*` binaries.
pub mod cli;
pub mod config;
pub mod logging;
mod login;
mod runner;

pub use login::StdinLoginSignal;
#[cfg(feature = "browser")]
pub use runner::capture_login;
pub use runner::{run_search, search_main};
