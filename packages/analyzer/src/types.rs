//! Core data types for the analyzer.
//!
//! These types describe exported web part records, the web part types the
//! analyzer can recognise, and the analysis results handed back to callers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{NON_EXPORTABLE_UNIDENTIFIED, SHAREPOINT_ASSEMBLY, UNKNOWN_TYPE};

/// Opaque property value as exported from the source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for PropertyValue {
    /// Stringify the way the export tool does: booleans are `True`/`False`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

/// Property bag of a web part: keys with possibly-null values.
///
/// Key lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: BTreeMap<String, Option<PropertyValue>>,
}

impl PropertyBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing an existing value with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<PropertyValue>) {
        self.entries.insert(key.into(), value);
    }

    /// Builder-style insert of a non-null value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Builder-style insert of a null value.
    #[must_use]
    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Check whether a key is present (null values count as present).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stringified value for a key; `Some("")` for a null value, `None` when absent.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .map(|v| v.as_ref().map(ToString::to_string).unwrap_or_default())
    }

    /// Iterate over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<PropertyValue>)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, Option<PropertyValue>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Filtered properties of a web part, name to stringified value.
pub type PropertyMap = BTreeMap<String, String>;

/// One exported web part: optional definition XML plus its property bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebPartRecord {
    /// Identifier of the web part on the source page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Title shown on the source page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Exported web part definition; absent without export rights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,

    #[serde(default)]
    pub properties: PropertyBag,
}

impl WebPartRecord {
    /// The definition XML, treating an empty string as absent.
    #[must_use]
    pub fn xml(&self) -> Option<&str> {
        self.xml.as_deref().filter(|x| !x.is_empty())
    }

    /// Human readable label for warnings: id, then title, then the given index.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.id
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| format!("#{}", index + 1))
    }
}

/// Web part types recognised from property fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebPartType {
    XsltListView,
    ListView,
    Media,
    SlideShow,
    Chart,
    Members,
    Silverlight,
    AddinPart,
    ScriptEditor,
    SandboxUserCode,
}

impl WebPartType {
    /// All known types, in fingerprint order.
    pub const ALL: [WebPartType; 10] = [
        Self::XsltListView,
        Self::ListView,
        Self::Media,
        Self::SlideShow,
        Self::Chart,
        Self::Members,
        Self::Silverlight,
        Self::AddinPart,
        Self::ScriptEditor,
        Self::SandboxUserCode,
    ];

    /// Short symbolic tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::XsltListView => "XsltListView",
            Self::ListView => "ListView",
            Self::Media => "Media",
            Self::SlideShow => "SlideShow",
            Self::Chart => "Chart",
            Self::Members => "Members",
            Self::Silverlight => "Silverlight",
            Self::AddinPart => "AddinPart",
            Self::ScriptEditor => "ScriptEditor",
            Self::SandboxUserCode => "SandboxUserCode",
        }
    }

    /// Class name without assembly.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::XsltListView => "Microsoft.SharePoint.WebPartPages.XsltListViewWebPart",
            Self::ListView => "Microsoft.SharePoint.WebPartPages.ListViewWebPart",
            Self::Media => "Microsoft.SharePoint.Publishing.WebControls.MediaWebPart",
            Self::SlideShow => "Microsoft.SharePoint.WebPartPages.PictureLibrarySlideshowWebPart",
            Self::Chart => "Microsoft.Office.Server.WebControls.ChartWebPart",
            Self::Members => "Microsoft.SharePoint.WebPartPages.MembersWebPart",
            Self::Silverlight => "Microsoft.SharePoint.WebPartPages.SilverlightWebPart",
            Self::AddinPart => "Microsoft.SharePoint.WebPartPages.ClientWebPart",
            Self::ScriptEditor => "Microsoft.SharePoint.WebPartPages.ScriptEditorWebPart",
            Self::SandboxUserCode => "Microsoft.SharePoint.WebPartPages.SPUserCodeWebPart",
        }
    }

    /// Assembly-qualified type name as used in transformation mappings.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let assembly = match self {
            Self::Media => {
                "Microsoft.SharePoint.Publishing, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c"
            }
            Self::Chart => {
                "Microsoft.Office.Server.Chart, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c"
            }
            _ => SHAREPOINT_ASSEMBLY,
        };
        format!("{}, {}", self.class_name(), assembly)
    }
}

impl fmt::Display for WebPartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// One of the fingerprinted types.
    Known(WebPartType),
    /// Type name read from XML that is not a fingerprinted type.
    Named(String),
    /// No XML was available to inspect.
    Unknown,
    /// No property fingerprint matched.
    NonExportableUnidentified,
}

impl ResolvedType {
    /// Build from a type name read from XML, promoting known qualified names.
    ///
    /// The match ignores ASCII case; a promoted name reports its canonical spelling.
    #[must_use]
    pub fn from_type_name(name: impl Into<String>) -> Self {
        let name = name.into();
        match WebPartType::ALL
            .into_iter()
            .find(|t| name.eq_ignore_ascii_case(&t.qualified_name()))
        {
            Some(known) => Self::Known(known),
            None => Self::Named(name),
        }
    }

    /// Type name used for mapping lookups and reports.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Known(t) => t.qualified_name(),
            Self::Named(name) => name.clone(),
            Self::Unknown => UNKNOWN_TYPE.to_string(),
            Self::NonExportableUnidentified => NON_EXPORTABLE_UNIDENTIFIED.to_string(),
        }
    }

    /// Check whether a mapping entry's type refers to this type.
    ///
    /// Case-insensitive; a known type also matches its short tag.
    #[must_use]
    pub fn matches(&self, mapping_type: &str) -> bool {
        if let Self::Known(t) = self {
            if mapping_type.eq_ignore_ascii_case(t.tag()) {
                return true;
            }
        }
        mapping_type.eq_ignore_ascii_case(&self.type_name())
    }

    /// Whether the type could not be determined at all.
    #[must_use]
    pub fn is_unidentified(&self) -> bool {
        matches!(self, Self::Unknown | Self::NonExportableUnidentified)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// Analysis result for one web part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzedWebPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Resolved type name (qualified name or sentinel).
    #[serde(rename = "type", serialize_with = "serialize_type")]
    pub web_part_type: ResolvedType,

    /// Properties selected for migration.
    pub properties: PropertyMap,
}

fn serialize_type<S: serde::Serializer>(
    value: &ResolvedType,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.type_name())
}

/// Result of analyzing a set of web parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub web_parts: Vec<AnalyzedWebPart>,

    /// Non-fatal problems: skipped records and unidentified web parts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Count analyzed web parts per type name, sorted by name.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for wp in &self.web_parts {
            *counts.entry(wp.web_part_type.type_name()).or_insert(0) += 1;
        }
        counts
    }
}
