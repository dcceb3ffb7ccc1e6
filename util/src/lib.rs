//! Logging setup and small helpers shared by the binaries in this workspace.

pub mod logger;

mod io;
mod utils;

pub use crate::io::{read_json, slurp_file, to_json};
pub use crate::utils::{basename, file_name, prettyprint_usize};
