//! Selection of the properties to keep for a web part.

use roxmltree::Document;

use crate::error::Result;
use crate::mapping::PageTransformation;
use crate::types::{PropertyBag, PropertyMap, ResolvedType};
use crate::xml::{deep_text, detect_schema, find_descendant_ns, SchemaVersion};

/// Collect the mapped properties of a web part.
///
/// The candidate names come from [`PageTransformation::properties_to_retrieve`].
/// Without XML, or for v3 XML, the property bag is the only source. For v2
/// XML a candidate missing from the bag is read from the same-named element
/// in the v2 namespace; if that element does not exist the candidate is left
/// out. Null bag values become empty strings.
///
/// # Errors
/// `XmlParse` for malformed XML, `UnsupportedNamespace` for XML that is
/// neither v2 nor v3.
///
/// # Examples
/// ```
/// use webpart_analyzer::filter::filter_properties;
/// use webpart_analyzer::mapping::{BaseWebPart, PageTransformation, PropertyDefinition};
/// use webpart_analyzer::types::{PropertyBag, ResolvedType};
///
/// let mapping = PageTransformation {
///     base_web_part: BaseWebPart {
///         properties: vec![PropertyDefinition::new("A"), PropertyDefinition::new("B")],
///     },
///     web_parts: Vec::new(),
/// };
/// let bag = PropertyBag::new().with("A", "x").with("C", "y");
///
/// let kept = filter_properties(&bag, &ResolvedType::Unknown, None, &mapping).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept["A"], "x");
/// ```
pub fn filter_properties(
    properties: &PropertyBag,
    web_part_type: &ResolvedType,
    xml: Option<&str>,
    mapping: &PageTransformation,
) -> Result<PropertyMap> {
    let candidates = mapping.properties_to_retrieve(web_part_type);

    let Some(xml) = xml.filter(|x| !x.is_empty()) else {
        // No export rights: the bag is all there is.
        return Ok(from_bag(properties, &candidates));
    };

    let doc = Document::parse(xml)?;
    let schema = detect_schema(&doc)?;

    let kept = match schema.version {
        SchemaVersion::V3 => from_bag(properties, &candidates),
        SchemaVersion::V2 => {
            let root = doc.root_element();
            let mut kept = PropertyMap::new();
            for name in candidates {
                if let Some(value) = properties.get_string(name) {
                    kept.insert(name.to_string(), value);
                } else if let Some(element) = find_descendant_ns(root, schema.namespace, name) {
                    tracing::debug!(property = name, "property taken from v2 XML");
                    kept.insert(name.to_string(), deep_text(element));
                }
            }
            kept
        }
    };

    tracing::debug!(
        web_part_type = %web_part_type,
        kept = kept.len(),
        "filtered web part properties"
    );
    Ok(kept)
}

fn from_bag(properties: &PropertyBag, candidates: &[&str]) -> PropertyMap {
    candidates
        .iter()
        .filter_map(|name| {
            properties
                .get_string(name)
                .map(|value| ((*name).to_string(), value))
        })
        .collect()
}
