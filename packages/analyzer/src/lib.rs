//! Web part analyzer - Detect legacy web part types and select the
//! properties to keep when migrating a page.
//!
//! Each web part exported from a classic page comes with a property bag and,
//! when the exporter had the rights, a definition XML. The analyzer resolves
//! the web part type from the XML (v2 `.dwp` or v3 `.webpart` schema) or,
//! without XML, from a property-key fingerprint, and then picks the
//! properties a transformation mapping asks for.
//!
//! # Example
//!
//! ```
//! use webpart_analyzer::fingerprint::create_default_fingerprints;
//! use webpart_analyzer::types::{PropertyBag, ResolvedType, WebPartType};
//!
//! let bag = PropertyBag::new().with("Content", "<script></script>");
//! let resolved = create_default_fingerprints().resolve(&bag);
//! assert_eq!(resolved, ResolvedType::Known(WebPartType::ScriptEditor));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Schema namespaces, sentinels and file format detection
//! - [`types`]: Records, property bags, web part types and results
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities and schema detection
//! - [`resolver`]: Type resolution from definition XML
//! - [`fingerprint`]: Type resolution from property keys
//! - [`mapping`]: Transformation mapping (properties to keep per type)
//! - [`filter`]: Property selection
//! - [`analyzer`]: Per-record pipeline with skip/abort policy
//! - [`yaml`]: Records input and report output
//! - [`cli`]: Command-line interface

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod mapping;
pub mod resolver;
pub mod types;
pub mod xml;
pub mod yaml;

// Re-export main functions
pub use analyzer::{FailurePolicy, WebPartAnalyzer};
pub use filter::filter_properties;
pub use resolver::resolve_type;

// Re-export commonly used items
pub use error::{AnalyzerError, Result};
pub use mapping::PageTransformation;
pub use types::{AnalysisReport, AnalyzedWebPart, PropertyBag, ResolvedType, WebPartRecord, WebPartType};
