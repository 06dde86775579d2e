//! Property fingerprint system for web parts without exportable XML.
//!
//! When a web part cannot be exported, the only evidence of its type is the
//! set of property keys the page returned. Each fingerprint is a set of keys
//! whose joint presence identifies one type; rules are checked in order and
//! the first full match wins.

mod config;
mod table;

pub use config::create_default_fingerprints;
pub use table::{FingerprintRule, FingerprintTable};
