use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::LicenseFinding;

pub const HEADER: [&str; 6] = [
    "ID",
    "Severity",
    "Instructions",
    "Dependencies",
    "Project Name",
    "Project ID",
];

/// File name for an organization's report. Path separators in the name become `_`.
pub fn report_file_name(organization_name: &str) -> String {
    let safe: String = organization_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_high_severity_licenses.csv", safe)
}

/// Write one row per (finding, project) pair to `<dir>/<name>_high_severity_licenses.csv`.
///
/// Returns `Ok(None)` without touching the file system when `findings` is empty.
pub fn write_findings(
    dir: &Path,
    organization_name: &str,
    findings: &[LicenseFinding],
) -> Result<Option<PathBuf>> {
    if findings.is_empty() {
        return Ok(None);
    }

    let path = dir.join(report_file_name(organization_name));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(HEADER)?;

    for finding in findings {
        let id = finding.id.to_string();
        let dependencies = finding.dependencies_cell();
        for project in &finding.projects {
            writer.write_record([
                id.as_str(),
                finding.severity.as_str(),
                finding.instructions.as_str(),
                dependencies.as_str(),
                project.name.as_str(),
                project.id.to_string().as_str(),
            ])?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote report");

    Ok(Some(path))
}
