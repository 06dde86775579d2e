//! Reading exported web part records.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::types::WebPartRecord;

/// Records file layout.
#[derive(Debug, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    web_parts: Vec<WebPartRecord>,
}

/// Parse web part records from YAML.
///
/// The document holds a `web_parts` list; each entry may carry `id`, `title`,
/// `xml` and a `properties` map.
///
/// # Examples
/// ```
/// use webpart_analyzer::yaml::parse_records;
///
/// let yaml = r#"
/// web_parts:
///   - id: g_1
///     properties:
///       Content: "<script></script>"
///       AllowEdit: true
/// "#;
/// let records = parse_records(yaml).unwrap();
/// assert_eq!(records.len(), 1);
/// assert!(records[0].properties.contains_key("Content"));
/// ```
pub fn parse_records(yaml: &str) -> Result<Vec<WebPartRecord>> {
    let file: RecordsFile = serde_yaml_ng::from_str(yaml)?;
    Ok(file.web_parts)
}

/// Load web part records from a YAML file.
pub fn load_records(path: &Path) -> Result<Vec<WebPartRecord>> {
    let content = fs::read_to_string(path)?;
    let records = parse_records(&content)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded web part records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_with_xml_and_nulls() {
        let yaml = r#"
web_parts:
  - id: a
    title: Welcome
    xml: |
      <WebPart xmlns="http://schemas.microsoft.com/WebPart/v2"><TypeName>T</TypeName></WebPart>
    properties:
      Title: Welcome
      Description: null
  - properties: {}
"#;
        let records = parse_records(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title.as_deref(), Some("Welcome"));
        assert!(records[0].xml().is_some());
        assert_eq!(
            records[0].properties.get_string("Description"),
            Some(String::new())
        );
        assert!(records[1].xml().is_none());
        assert!(records[1].properties.is_empty());
    }

    #[test]
    fn test_parse_records_empty_document_list() {
        assert!(parse_records("web_parts: []").unwrap().is_empty());
    }

    #[test]
    fn test_parse_records_invalid_yaml() {
        assert!(parse_records("web_parts: [").is_err());
    }
}
