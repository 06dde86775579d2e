//! Web part schema detection.

use roxmltree::Document;

use crate::config::{WEBPART_V2_NAMESPACE, WEBPART_V3_NAMESPACE};
use crate::error::{AnalyzerError, Result};

/// Schema variant of a web part definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// `.dwp` definitions: properties are child elements, type in `TypeName`/`Assembly`.
    V2,
    /// `.webpart` definitions: type in `metaData/type/@name`.
    V3,
}

/// Detected schema plus the namespace URI exactly as spelled in the document.
///
/// Element lookups must use `namespace`, not the canonical constant, since the
/// comparison that selected the version is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebPartSchema<'a> {
    pub version: SchemaVersion,
    pub namespace: &'a str,
}

/// Detect the schema of a parsed web part definition.
///
/// The default namespace in scope on the root's first child element decides
/// the version. A root without element children is inspected itself.
///
/// # Errors
/// `UnsupportedNamespace` when the default namespace is missing or is neither
/// the v2 nor the v3 web part namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use webpart_analyzer::xml::{detect_schema, SchemaVersion};
///
/// let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3"/></webParts>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(detect_schema(&doc).unwrap().version, SchemaVersion::V3);
/// ```
pub fn detect_schema<'a>(doc: &'a Document<'_>) -> Result<WebPartSchema<'a>> {
    let root = doc.root_element();
    let web_part = root.first_element_child().unwrap_or(root);

    let namespace = web_part.lookup_namespace_uri(None).unwrap_or_default();

    let version = if namespace.eq_ignore_ascii_case(WEBPART_V3_NAMESPACE) {
        SchemaVersion::V3
    } else if namespace.eq_ignore_ascii_case(WEBPART_V2_NAMESPACE) {
        SchemaVersion::V2
    } else {
        return Err(AnalyzerError::UnsupportedNamespace(namespace.to_string()));
    };

    tracing::debug!(?version, namespace, "detected web part schema");
    Ok(WebPartSchema { version, namespace })
}
