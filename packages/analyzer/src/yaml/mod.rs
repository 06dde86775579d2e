//! YAML input and output.

mod reader;
mod writer;

pub use reader::{load_records, parse_records};
pub use writer::{generate_yaml, save_yaml};
