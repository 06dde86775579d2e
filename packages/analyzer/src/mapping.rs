//! Transformation mapping: which properties to keep per web part type.
//!
//! The mapping lists base properties retrieved for every web part plus
//! per-type property lists. It can be written as YAML:
//!
//! ```yaml
//! base_web_part:
//!   properties:
//!     - name: Title
//!       type: string
//! web_parts:
//!   - type: ScriptEditor
//!     properties:
//!       - name: Content
//! ```
//!
//! or loaded from a legacy `PageTransformation` XML mapping file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::config::MappingFormat;
use crate::error::{AnalyzerError, Result};
use crate::types::ResolvedType;
use crate::xml::{find_child, find_children, get_attribute, get_tag_name};

/// A property to keep, with an optional type hint (`string`, `bool`, `guid`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

impl PropertyDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: None,
        }
    }
}

/// Properties retrieved for every web part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseWebPart {
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

/// Properties retrieved for one web part type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPartMapping {
    /// Qualified type name or short tag, matched case-insensitively.
    #[serde(rename = "type")]
    pub web_part_type: String,

    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

/// Complete transformation mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTransformation {
    #[serde(default)]
    pub base_web_part: BaseWebPart,

    #[serde(default)]
    pub web_parts: Vec<WebPartMapping>,
}

impl PageTransformation {
    /// Parse a YAML mapping.
    ///
    /// # Errors
    /// `Yaml` when the document does not deserialize.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse a legacy `PageTransformation` XML mapping.
    ///
    /// Namespaces are ignored; elements other than `BaseWebPart` and
    /// `WebParts` (functions, selectors, mappings) are skipped.
    ///
    /// # Errors
    /// `XmlParse` for malformed XML, `InvalidMapping` when the root element is
    /// not `PageTransformation`.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        if get_tag_name(root) != "PageTransformation" {
            return Err(AnalyzerError::InvalidMapping(format!(
                "expected root element <PageTransformation>, found <{}>",
                get_tag_name(root)
            )));
        }

        let base_web_part = BaseWebPart {
            properties: find_child(root, "BaseWebPart")
                .map(parse_xml_properties)
                .unwrap_or_default(),
        };

        let web_parts = find_child(root, "WebParts")
            .map(|web_parts| {
                find_children(web_parts, "WebPart")
                    .map(|wp| WebPartMapping {
                        web_part_type: get_attribute(wp, "Type").unwrap_or_default().to_string(),
                        properties: parse_xml_properties(wp),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            base_web_part,
            web_parts,
        })
    }

    /// Load and validate a mapping file; `.xml` files use the XML format.
    ///
    /// # Errors
    /// `Io` when the file cannot be read, plus any parse or validation error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mapping = match MappingFormat::from_path(path) {
            MappingFormat::Xml => Self::from_xml_str(&content)?,
            MappingFormat::Yaml => Self::from_yaml_str(&content)?,
        };
        mapping.validate()?;

        tracing::debug!(
            path = %path.display(),
            base_properties = mapping.base_web_part.properties.len(),
            web_parts = mapping.web_parts.len(),
            "loaded transformation mapping"
        );
        Ok(mapping)
    }

    /// Check the mapping is usable.
    ///
    /// Duplicate type entries are allowed but logged; lookups use the first.
    ///
    /// # Errors
    /// `InvalidMapping` when a web part entry has an empty type.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, wp) in self.web_parts.iter().enumerate() {
            let web_part_type = wp.web_part_type.trim();
            if web_part_type.is_empty() {
                return Err(AnalyzerError::InvalidMapping(format!(
                    "web part entry {} has no type",
                    index + 1
                )));
            }
            if !seen.insert(web_part_type.to_lowercase()) {
                tracing::warn!(web_part_type, "duplicate web part mapping, first entry is used");
            }
        }
        Ok(())
    }

    /// First mapping entry for a resolved type.
    #[must_use]
    pub fn web_part_mapping(&self, web_part_type: &ResolvedType) -> Option<&WebPartMapping> {
        self.web_parts
            .iter()
            .find(|wp| web_part_type.matches(&wp.web_part_type))
    }

    /// Names of the properties to retrieve for a type: base properties first,
    /// then the type's own. Empty names are dropped and each name is listed once.
    #[must_use]
    pub fn properties_to_retrieve(&self, web_part_type: &ResolvedType) -> Vec<&str> {
        let specific = self
            .web_part_mapping(web_part_type)
            .map(|wp| wp.properties.as_slice())
            .unwrap_or_default();

        let mut seen = HashSet::new();
        self.base_web_part
            .properties
            .iter()
            .chain(specific)
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect()
    }
}

/// Collect `Properties/Property` definitions below a node.
fn parse_xml_properties(node: Node<'_, '_>) -> Vec<PropertyDefinition> {
    let Some(properties) = find_child(node, "Properties") else {
        return Vec::new();
    };
    find_children(properties, "Property")
        .map(|p| PropertyDefinition {
            name: get_attribute(p, "Name").unwrap_or_default().to_string(),
            property_type: get_attribute(p, "Type").map(String::from),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WebPartType;

    const XML_MAPPING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PageTransformation xmlns="http://schemas.dev.office.com/PnP/2018/01/PageTransformationSchema">
  <BaseWebPart>
    <Properties>
      <Property Name="Title" Type="string" />
      <Property Name="ZoneId" Type="string" />
    </Properties>
  </BaseWebPart>
  <WebParts>
    <WebPart Type="Microsoft.SharePoint.WebPartPages.ScriptEditorWebPart, Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c">
      <Properties>
        <Property Name="Content" Type="string" />
        <Property Name="Title" Type="string" />
      </Properties>
      <Mappings>
        <Mapping Default="true" Name="Default" />
      </Mappings>
    </WebPart>
    <WebPart Type="Microsoft.SharePoint.WebPartPages.ContentEditorWebPart, Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c">
      <Properties>
        <Property Name="ContentLink" Type="string" />
        <Property Name="Content" Type="string" />
      </Properties>
    </WebPart>
  </WebParts>
</PageTransformation>"#;

    #[test]
    fn test_from_xml_str() {
        let mapping = PageTransformation::from_xml_str(XML_MAPPING).unwrap();
        assert_eq!(mapping.base_web_part.properties.len(), 2);
        assert_eq!(
            mapping.base_web_part.properties[0].property_type.as_deref(),
            Some("string")
        );
        assert_eq!(mapping.web_parts.len(), 2);
        assert_eq!(mapping.web_parts[1].properties[0].name, "ContentLink");
    }

    #[test]
    fn test_from_xml_str_wrong_root() {
        let err = PageTransformation::from_xml_str("<Mapping/>").unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidMapping(_)));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
base_web_part:
  properties:
    - name: Title
      type: string
web_parts:
  - type: ScriptEditor
    properties:
      - name: Content
"#;
        let mapping = PageTransformation::from_yaml_str(yaml).unwrap();
        assert_eq!(mapping.base_web_part.properties[0].name, "Title");
        assert_eq!(mapping.web_parts[0].web_part_type, "ScriptEditor");
        assert_eq!(mapping.web_parts[0].properties[0].property_type, None);
    }

    #[test]
    fn test_yaml_and_xml_agree() {
        let yaml = r#"
base_web_part:
  properties:
    - { name: Title, type: string }
    - { name: ZoneId, type: string }
web_parts:
  - type: "Microsoft.SharePoint.WebPartPages.ScriptEditorWebPart, Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c"
    properties:
      - { name: Content, type: string }
      - { name: Title, type: string }
  - type: "Microsoft.SharePoint.WebPartPages.ContentEditorWebPart, Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c"
    properties:
      - { name: ContentLink, type: string }
      - { name: Content, type: string }
"#;
        assert_eq!(
            PageTransformation::from_yaml_str(yaml).unwrap(),
            PageTransformation::from_xml_str(XML_MAPPING).unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_empty_type() {
        let mapping = PageTransformation {
            web_parts: vec![WebPartMapping::default()],
            ..Default::default()
        };
        let err = mapping.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid transformation mapping: web part entry 1 has no type"
        );
    }

    #[test]
    fn test_properties_to_retrieve_base_then_specific_deduplicated() {
        let mapping = PageTransformation::from_xml_str(XML_MAPPING).unwrap();
        let names =
            mapping.properties_to_retrieve(&ResolvedType::Known(WebPartType::ScriptEditor));
        assert_eq!(names, vec!["Title", "ZoneId", "Content"]);
    }

    #[test]
    fn test_properties_to_retrieve_case_insensitive_type() {
        let mapping = PageTransformation::from_xml_str(XML_MAPPING).unwrap();
        let ty = ResolvedType::Named(
            "microsoft.sharepoint.webpartpages.contenteditorwebpart, microsoft.sharepoint, version=16.0.0.0, culture=neutral, publickeytoken=71e9bce111e9429c"
                .to_string(),
        );
        assert_eq!(
            mapping.properties_to_retrieve(&ty),
            vec!["Title", "ZoneId", "ContentLink", "Content"]
        );
    }

    #[test]
    fn test_properties_to_retrieve_unmapped_type_uses_base_only() {
        let mapping = PageTransformation::from_xml_str(XML_MAPPING).unwrap();
        assert_eq!(
            mapping.properties_to_retrieve(&ResolvedType::NonExportableUnidentified),
            vec!["Title", "ZoneId"]
        );
    }

    #[test]
    fn test_properties_to_retrieve_skips_empty_names() {
        let mapping = PageTransformation {
            base_web_part: BaseWebPart {
                properties: vec![PropertyDefinition::new(""), PropertyDefinition::new("Title")],
            },
            web_parts: Vec::new(),
        };
        assert_eq!(
            mapping.properties_to_retrieve(&ResolvedType::Unknown),
            vec!["Title"]
        );
    }
}
