//! XML utilities for web part definitions.

mod schema;
mod utils;

pub use schema::{detect_schema, SchemaVersion, WebPartSchema};
pub use utils::{deep_text, find_child, find_children, find_descendant_ns, get_attribute, get_tag_name};
