//! Command-line interface module.

mod args;
mod run;

pub use args::{Cli, Commands};
pub use run::{run_assign, run_index, run_resolve, run_url};
