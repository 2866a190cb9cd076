//! Validation reports and the machine-readable report payload.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use studykit_model::{FileReference, Issue, LocalizationKey};

const REPORT_SCHEMA: &str = "studykit.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Everything found for one resource family.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyReport {
    pub reference: FileReference,
    /// Discovered localizations, in sorted order.
    pub localizations: Vec<LocalizationKey>,
    /// The base localization every diff was reported against.
    pub base: LocalizationKey,
    pub issues: Vec<Issue>,
}

/// A family whose check aborted on a hard error (unreadable document or
/// directory).
#[derive(Debug, Clone, Serialize)]
pub struct FamilyFailure {
    pub reference: FileReference,
    pub error: String,
}

/// The outcome of validating a bundle's referenced resource families.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub families: Vec<FamilyReport>,
    pub failures: Vec<FamilyFailure>,
}

impl ValidationReport {
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.families.iter().flat_map(|family| &family.issues)
    }

    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    /// True when no family produced issues and none failed hard.
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0 && self.failures.is_empty()
    }

    /// The user-facing error text: every rendered issue joined by
    /// newlines. Bundle writers surface this when rejecting a bundle.
    pub fn render_issues(&self) -> String {
        self.issues()
            .map(|issue| issue.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub study_id: String,
    pub families: Vec<FamilyPayload>,
    pub failures: Vec<FamilyFailure>,
}

#[derive(Debug, Serialize)]
pub struct FamilyPayload {
    pub resource: String,
    pub localizations: Vec<LocalizationKey>,
    pub base: LocalizationKey,
    pub issue_count: usize,
    pub issues: Vec<IssuePayload>,
}

#[derive(Debug, Serialize)]
pub struct IssuePayload {
    pub message: String,
    pub issue: Issue,
}

/// Write the versioned JSON report next to the bundle outputs.
pub fn write_validation_report_json(
    output_dir: &Path,
    study_id: &str,
    report: &ValidationReport,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join("validation_report.json");
    let payload = ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        study_id: study_id.to_string(),
        families: report
            .families
            .iter()
            .map(|family| FamilyPayload {
                resource: family.reference.to_string(),
                localizations: family.localizations.clone(),
                base: family.base.clone(),
                issue_count: family.issues.len(),
                issues: family
                    .issues
                    .iter()
                    .map(|issue| IssuePayload {
                        message: issue.to_string(),
                        issue: issue.clone(),
                    })
                    .collect(),
            })
            .collect(),
        failures: report.failures.clone(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
