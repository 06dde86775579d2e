//! Error types for the analyzer.
//!
//! A single `AnalyzerError` is returned to library consumers. Callers decide
//! whether a failing web part is skipped or aborts the run, see
//! [`FailurePolicy`](crate::analyzer::FailurePolicy).

use thiserror::Error;

/// Main error type for the analyzer library.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The web part XML uses a namespace that is neither the v2 nor the v3 schema.
    #[error("Unsupported web part namespace: '{}'", namespace_or_none(.0))]
    UnsupportedNamespace(String),

    /// Missing required XML element or attribute.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Transformation mapping is not usable.
    #[error("Invalid transformation mapping: {0}")]
    InvalidMapping(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML processing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

fn namespace_or_none(namespace: &str) -> &str {
    if namespace.is_empty() {
        "(none)"
    } else {
        namespace
    }
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
