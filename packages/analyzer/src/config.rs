//! Configuration constants for the analyzer.

use std::path::Path;

/// Default namespace of v3 (`.webpart`) web part definitions.
pub const WEBPART_V3_NAMESPACE: &str = "http://schemas.microsoft.com/WebPart/v3";

/// Default namespace of v2 (`.dwp`) web part definitions.
pub const WEBPART_V2_NAMESPACE: &str = "http://schemas.microsoft.com/WebPart/v2";

/// Type name returned when no web part XML is available.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Type name returned when no property fingerprint matches.
pub const NON_EXPORTABLE_UNIDENTIFIED: &str = "NonExportable_Unidentified";

/// Assembly suffix shared by the SharePoint server types.
pub const SHAREPOINT_ASSEMBLY: &str =
    "Microsoft.SharePoint, Version=16.0.0.0, Culture=neutral, PublicKeyToken=71e9bce111e9429c";

/// On-disk format of a transformation mapping file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    /// Legacy `PageTransformation` XML mapping.
    Xml,
    /// YAML mapping.
    Yaml,
}

impl MappingFormat {
    /// Detect the mapping format from a file extension.
    ///
    /// `.xml` (any case) is XML, everything else is read as YAML.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use webpart_analyzer::config::MappingFormat;
    ///
    /// assert_eq!(MappingFormat::from_path(Path::new("webpartmapping.xml")), MappingFormat::Xml);
    /// assert_eq!(MappingFormat::from_path(Path::new("mapping.yaml")), MappingFormat::Yaml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Self::Xml,
            _ => Self::Yaml,
        }
    }
}
