//! Per-family validation orchestration.

use std::path::Path;

use tracing::{debug, warn};

use studykit_ingest::{
    CandidateFile, IngestError, discover_localizations, load_article_document,
    load_structured_document,
};
use studykit_model::{FileReference, Issue, LocalizationKey, ResourceCategory};

use crate::article::{check_article, compare_articles};
use crate::choice::{collect_options, find_conflicts};
use crate::error::{Result, ValidateError};
use crate::questionnaire::{check_questionnaire, compare_questionnaires};
use crate::report::{FamilyFailure, FamilyReport, ValidationReport};

/// Validation settings shared across resource families.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Preferred base localization for cross-locale comparison.
    pub default_localization: Option<LocalizationKey>,
}

/// Choose the base localization for a family.
///
/// Deterministic given the same candidate set: the designated default when
/// present, else the first candidate sharing the default's language, else
/// the first candidate in sorted discovery order. Every diff is reported
/// relative to this choice, so an unstable pick would make diagnostics
/// unstable.
///
/// # Panics
///
/// Panics on an empty candidate set.
pub fn select_base<'a>(
    candidates: &'a [CandidateFile],
    options: &ValidationOptions,
) -> &'a CandidateFile {
    if let Some(default) = &options.default_localization {
        if let Some(exact) = candidates
            .iter()
            .find(|candidate| &candidate.reference.localization == default)
        {
            return exact;
        }
        if let Some(language) = candidates
            .iter()
            .find(|candidate| candidate.reference.localization.matches_language(default))
        {
            return language;
        }
    }
    &candidates[0]
}

/// Validate every localization of one logical resource.
///
/// Soft issues accumulate in the returned report; unreadable documents
/// abort this family with a hard error.
pub fn validate_family(
    bundle_dir: &Path,
    file_ref: &FileReference,
    options: &ValidationOptions,
) -> Result<FamilyReport> {
    let candidates = discover_localizations(bundle_dir, file_ref)?;
    if candidates.is_empty() {
        return Err(ValidateError::NoLocalizations {
            reference: file_ref.clone(),
        });
    }
    let base = select_base(&candidates, options);
    debug!(
        resource = %file_ref,
        base = %base.reference.localization,
        localizations = candidates.len(),
        "validating resource family"
    );
    let issues = match file_ref.category {
        ResourceCategory::Questionnaire => validate_questionnaire_family(&candidates, base)?,
        ResourceCategory::Article | ResourceCategory::Consent => {
            validate_article_family(&candidates, base)?
        }
    };
    Ok(FamilyReport {
        reference: file_ref.clone(),
        localizations: candidates
            .iter()
            .map(|candidate| candidate.reference.localization.clone())
            .collect(),
        base: base.reference.localization.clone(),
        issues,
    })
}

fn validate_questionnaire_family(
    candidates: &[CandidateFile],
    base: &CandidateFile,
) -> Result<Vec<Issue>> {
    let base_document = load_structured_document(&base.path)?;
    let mut issues = check_questionnaire(&base_document, &base.reference);
    issues.extend(find_conflicts(
        &base.reference,
        &collect_options(&base_document),
    ));
    for candidate in candidates {
        if candidate.path == base.path {
            continue;
        }
        let document = load_structured_document(&candidate.path)?;
        issues.extend(check_questionnaire(&document, &candidate.reference));
        issues.extend(find_conflicts(
            &candidate.reference,
            &collect_options(&document),
        ));
        issues.extend(compare_questionnaires(
            &base_document,
            &base.reference,
            &document,
            &candidate.reference,
        ));
    }
    Ok(issues)
}

fn validate_article_family(
    candidates: &[CandidateFile],
    base: &CandidateFile,
) -> Result<Vec<Issue>> {
    let base_document = load_article_document(&base.path)?;
    let mut issues = check_article(&base_document, &base.reference);
    for candidate in candidates {
        if candidate.path == base.path {
            continue;
        }
        let document = load_article_document(&candidate.path)?;
        issues.extend(check_article(&document, &candidate.reference));
        issues.extend(compare_articles(
            &base_document,
            &base.reference,
            &document,
            &candidate.reference,
        ));
    }
    Ok(issues)
}

/// Validate every referenced resource family of a bundle.
///
/// Families are checked sequentially in `FileReference` order so the
/// report is deterministic. A family whose check hits a hard error is
/// recorded as a failure without aborting its siblings.
pub fn validate_bundle(
    bundle_dir: &Path,
    references: &[FileReference],
    options: &ValidationOptions,
) -> Result<ValidationReport> {
    if !bundle_dir.is_dir() {
        return Err(ValidateError::Ingest(IngestError::DirectoryNotFound {
            path: bundle_dir.to_path_buf(),
        }));
    }
    let mut references: Vec<FileReference> = references.to_vec();
    references.sort();
    references.dedup();

    let mut report = ValidationReport::default();
    for file_ref in &references {
        match validate_family(bundle_dir, file_ref, options) {
            Ok(family) => report.families.push(family),
            Err(error) => {
                warn!(resource = %file_ref, %error, "family validation aborted");
                report.failures.push(FamilyFailure {
                    reference: file_ref.clone(),
                    error: error.to_string(),
                });
            }
        }
    }
    Ok(report)
}
