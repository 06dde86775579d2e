//! Type resolution from exported web part XML.

use roxmltree::Document;

use crate::error::{AnalyzerError, Result};
use crate::types::ResolvedType;
use crate::xml::{deep_text, detect_schema, find_descendant_ns, get_attribute, SchemaVersion};

/// Resolve the type of a web part from its definition XML.
///
/// - no XML (or an empty string): [`ResolvedType::Unknown`]
/// - v3: `name` attribute of the first `type` element
/// - v2: `"{TypeName}, {Assembly}"`
///
/// Names matching a fingerprinted type come back as [`ResolvedType::Known`].
///
/// # Errors
/// - `XmlParse` for malformed XML
/// - `UnsupportedNamespace` for any other schema
/// - `MissingElement` when the type information is not where the schema puts it
///
/// # Examples
/// ```
/// use webpart_analyzer::resolver::resolve_type;
///
/// let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3">
///   <metaData><type name="Foo.Bar"/></metaData>
/// </webPart></webParts>"#;
/// assert_eq!(resolve_type(Some(xml)).unwrap().type_name(), "Foo.Bar");
/// assert_eq!(resolve_type(None).unwrap().type_name(), "Unknown");
/// ```
pub fn resolve_type(xml: Option<&str>) -> Result<ResolvedType> {
    let Some(xml) = xml.filter(|x| !x.is_empty()) else {
        return Ok(ResolvedType::Unknown);
    };

    let doc = Document::parse(xml)?;
    let schema = detect_schema(&doc)?;
    let root = doc.root_element();

    let type_name = match schema.version {
        SchemaVersion::V3 => {
            let type_node = find_descendant_ns(root, schema.namespace, "type").ok_or_else(|| {
                AnalyzerError::MissingElement {
                    element: "type".to_string(),
                    context: "v3 web part".to_string(),
                }
            })?;
            get_attribute(type_node, "name")
                .ok_or_else(|| AnalyzerError::MissingElement {
                    element: "type/@name".to_string(),
                    context: "v3 web part".to_string(),
                })?
                .to_string()
        }
        SchemaVersion::V2 => {
            let class_name = required_v2_text(root, schema.namespace, "TypeName")?;
            let assembly = required_v2_text(root, schema.namespace, "Assembly")?;
            format!("{class_name}, {assembly}")
        }
    };

    tracing::debug!(%type_name, "resolved web part type from XML");
    Ok(ResolvedType::from_type_name(type_name))
}

/// Trimmed text of a required v2 element; an element without text counts as missing.
fn required_v2_text(root: roxmltree::Node<'_, '_>, namespace: &str, tag: &str) -> Result<String> {
    find_descendant_ns(root, namespace, tag)
        .map(|node| deep_text(node).trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AnalyzerError::MissingElement {
            element: tag.to_string(),
            context: "v2 web part".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WebPartType;

    const V3_XSLT: &str = r#"<webParts>
  <webPart xmlns="http://schemas.microsoft.com/WebPart/v3">
    <metaData>
      <type name="Microsoft.SharePoint.WebPartPages.XsltListViewWebPart, Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c" />
      <importErrorMessage>Cannot import this Web Part.</importErrorMessage>
    </metaData>
    <data><properties><property name="Title" type="string">Documents</property></properties></data>
  </webPart>
</webParts>"#;

    #[test]
    fn test_absent_and_empty_xml_are_unknown() {
        assert_eq!(resolve_type(None).unwrap(), ResolvedType::Unknown);
        assert_eq!(resolve_type(Some("")).unwrap(), ResolvedType::Unknown);
    }

    #[test]
    fn test_v3_name_attribute() {
        let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3"><metaData><type name="Foo.Bar" /></metaData></webPart></webParts>"#;
        assert_eq!(
            resolve_type(Some(xml)).unwrap(),
            ResolvedType::Named("Foo.Bar".to_string())
        );
    }

    #[test]
    fn test_v3_known_type_is_promoted() {
        assert_eq!(
            resolve_type(Some(V3_XSLT)).unwrap(),
            ResolvedType::Known(WebPartType::XsltListView)
        );
    }

    #[test]
    fn test_v2_type_and_assembly() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2">
  <Title>t</Title>
  <Assembly>Bar</Assembly>
  <TypeName>Foo</TypeName>
</WebPart>"#;
        assert_eq!(
            resolve_type(Some(xml)).unwrap(),
            ResolvedType::Named("Foo, Bar".to_string())
        );
    }

    #[test]
    fn test_v3_missing_type_element() {
        let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3"><metaData/></webPart></webParts>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "type"));
    }

    #[test]
    fn test_v3_missing_name_attribute() {
        let xml = r#"<webParts><webPart xmlns="http://schemas.microsoft.com/WebPart/v3"><metaData><type/></metaData></webPart></webParts>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "type/@name")
        );
    }

    #[test]
    fn test_v2_missing_assembly() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2"><TypeName>Foo</TypeName></WebPart>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "Assembly")
        );
    }

    #[test]
    fn test_v2_missing_type_name() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2"><Assembly>Bar</Assembly></WebPart>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "TypeName")
        );
    }

    #[test]
    fn test_v2_type_name_after_comment() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2">
  <TypeName><!-- generated -->Foo</TypeName>
  <Assembly>Bar</Assembly>
</WebPart>"#;
        assert_eq!(resolve_type(Some(xml)).unwrap().type_name(), "Foo, Bar");
    }

    #[test]
    fn test_v2_type_name_with_nested_markup() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2">
  <TypeName>Foo<b xmlns="urn:x">.Inner</b></TypeName>
  <Assembly>Bar</Assembly>
</WebPart>"#;
        assert_eq!(resolve_type(Some(xml)).unwrap().type_name(), "Foo.Inner, Bar");
    }

    #[test]
    fn test_v2_empty_type_name_is_missing() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2">
  <TypeName> <!-- none --> </TypeName>
  <Assembly>Bar</Assembly>
</WebPart>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "TypeName")
        );
    }

    #[test]
    fn test_root_element_is_not_its_own_descendant() {
        let xml = r#"<TypeName xmlns="http://schemas.microsoft.com/WebPart/v2"><Assembly>Bar</Assembly></TypeName>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(
            matches!(err, AnalyzerError::MissingElement { ref element, .. } if element == "TypeName")
        );
    }

    #[test]
    fn test_v2_element_in_other_namespace_is_ignored() {
        let xml = r#"<WebPart xmlns="http://schemas.microsoft.com/WebPart/v2">
  <TypeName xmlns="urn:other">Foo</TypeName>
  <Assembly>Bar</Assembly>
</WebPart>"#;
        assert!(resolve_type(Some(xml)).is_err());
    }

    #[test]
    fn test_unsupported_namespace() {
        let xml = r#"<root xmlns="urn:something"><type name="x"/></root>"#;
        let err = resolve_type(Some(xml)).unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedNamespace(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let err = resolve_type(Some("<webParts><webPart>")).unwrap_err();
        assert!(matches!(err, AnalyzerError::XmlParse(_)));
    }
}
