//! Default fingerprints for non-exportable SharePoint web parts.

use super::table::FingerprintTable;
use crate::types::WebPartType;

/// Create the default fingerprint table.
///
/// Order matters: a bag is reported as the first type whose keys it contains.
/// The sandbox user code fingerprint only holds generic web part keys, so it
/// has to stay last.
#[must_use]
pub fn create_default_fingerprints() -> FingerprintTable {
    FingerprintTable::new()
        .with_rule(
            WebPartType::XsltListView,
            ["ListUrl", "ListId", "Xsl", "JSLink", "ShowTimelineIfAvailable"],
        )
        .with_rule(
            WebPartType::ListView,
            ["ListViewXml", "ListName", "ListId", "ViewContentTypeId", "PageType"],
        )
        .with_rule(
            WebPartType::Media,
            [
                "AutoPlay",
                "MediaSource",
                "Loop",
                "IsPreviewImageSourceOverridenForVideoSet",
                "PreviewImageSource",
            ],
        )
        .with_rule(
            WebPartType::SlideShow,
            ["LibraryGuid", "Layout", "Speed", "ShowToolbar", "ViewGuid"],
        )
        .with_rule(
            WebPartType::Chart,
            [
                "ConnectionPointEnabled",
                "ChartXml",
                "DataBindingsString",
                "DesignerChartTheme",
            ],
        )
        .with_rule(
            WebPartType::Members,
            ["NumberLimit", "DisplayType", "MembershipGroupId", "Toolbar"],
        )
        .with_rule(
            WebPartType::Silverlight,
            [
                "MinRuntimeVersion",
                "WindowlessMode",
                "CustomInitParameters",
                "Url",
                "ApplicationXml",
            ],
        )
        .with_rule(
            WebPartType::AddinPart,
            ["FeatureId", "ProductWebId", "ProductId"],
        )
        .with_rule(WebPartType::ScriptEditor, ["Content"])
        .with_rule(
            WebPartType::SandboxUserCode,
            ["CatalogIconImageUrl", "AllowEdit", "TitleIconImageUrl", "ExportMode"],
        )
}
