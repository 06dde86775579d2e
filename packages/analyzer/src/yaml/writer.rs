//! YAML writer for analysis reports.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::AnalysisReport;

/// Serialize an analysis report to YAML.
pub fn generate_yaml(report: &AnalysisReport) -> Result<String> {
    Ok(serde_yaml_ng::to_string(report)?)
}

/// Write an analysis report to a YAML file.
pub fn save_yaml(report: &AnalysisReport, path: &Path) -> Result<()> {
    fs::write(path, generate_yaml(report)?)?;
    Ok(())
}
