//! Web part analyzer that ties type resolution and property filtering together.

use crate::error::Result;
use crate::filter::filter_properties;
use crate::fingerprint::{create_default_fingerprints, FingerprintTable};
use crate::mapping::PageTransformation;
use crate::resolver::resolve_type;
use crate::types::{AnalysisReport, AnalyzedWebPart, ResolvedType, WebPartRecord};

/// What to do when a single web part cannot be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the error as a warning and continue with the next web part.
    #[default]
    Skip,
    /// Stop and return the error.
    Abort,
}

/// Analyzer holding the fingerprint table and transformation mapping.
///
/// Both are immutable once the analyzer is built, so one analyzer can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct WebPartAnalyzer {
    fingerprints: FingerprintTable,
    mapping: PageTransformation,
}

impl WebPartAnalyzer {
    /// Create an analyzer from a fingerprint table and mapping.
    #[must_use]
    pub fn new(fingerprints: FingerprintTable, mapping: PageTransformation) -> Self {
        Self {
            fingerprints,
            mapping,
        }
    }

    /// Create an analyzer with the default fingerprints.
    #[must_use]
    pub fn with_mapping(mapping: PageTransformation) -> Self {
        Self::new(create_default_fingerprints(), mapping)
    }

    /// Resolve the type of a record: from its XML when exported, otherwise
    /// from its property fingerprint.
    ///
    /// # Errors
    /// See [`resolve_type`].
    pub fn resolve(&self, record: &WebPartRecord) -> Result<ResolvedType> {
        match record.xml() {
            Some(xml) => resolve_type(Some(xml)),
            None => Ok(self.fingerprints.resolve(&record.properties)),
        }
    }

    /// Analyze one web part.
    ///
    /// # Errors
    /// Any error from type resolution or property filtering.
    pub fn analyze(&self, record: &WebPartRecord) -> Result<AnalyzedWebPart> {
        let web_part_type = self.resolve(record)?;
        let properties =
            filter_properties(&record.properties, &web_part_type, record.xml(), &self.mapping)?;

        Ok(AnalyzedWebPart {
            id: record.id.clone(),
            title: record.title.clone(),
            web_part_type,
            properties,
        })
    }

    /// Analyze a list of web parts.
    ///
    /// Unidentified web parts are kept in the report and flagged for manual
    /// review in the warnings.
    ///
    /// # Errors
    /// With [`FailurePolicy::Abort`], the first error encountered.
    pub fn analyze_all(
        &self,
        records: &[WebPartRecord],
        policy: FailurePolicy,
    ) -> Result<AnalysisReport> {
        self.analyze_all_with_progress(records, policy, |_| {})
    }

    /// [`analyze_all`](Self::analyze_all) calling `on_progress` after each record.
    ///
    /// # Errors
    /// With [`FailurePolicy::Abort`], the first error encountered.
    pub fn analyze_all_with_progress(
        &self,
        records: &[WebPartRecord],
        policy: FailurePolicy,
        mut on_progress: impl FnMut(usize),
    ) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::default();

        for (index, record) in records.iter().enumerate() {
            match self.analyze(record) {
                Ok(analyzed) => {
                    if analyzed.web_part_type.is_unidentified() {
                        report.warnings.push(format!(
                            "Web part {}: type could not be identified, review manually",
                            record.label(index)
                        ));
                    }
                    report.web_parts.push(analyzed);
                }
                Err(e) if policy == FailurePolicy::Skip => {
                    tracing::warn!(web_part = %record.label(index), error = %e, "skipping web part");
                    report
                        .warnings
                        .push(format!("Web part {}: {e}", record.label(index)));
                }
                Err(e) => return Err(e),
            }
            on_progress(index + 1);
        }

        Ok(report)
    }
}
