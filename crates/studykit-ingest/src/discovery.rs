//! Candidate discovery inside a bundle directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use studykit_model::{
    FileReference, LocalizedFileReference, ResourceCategory, parse_localized_filename,
};

use crate::error::{IngestError, Result};

/// A discovered candidate file: a physical location plus the localized
/// reference recovered from its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub reference: LocalizedFileReference,
}

/// List the filenames in a category folder, sorted by name.
///
/// A missing category folder yields an empty list (bundles need not ship
/// every category); a missing bundle root or an unreadable directory is a
/// hard error.
pub fn list_category_files(bundle_dir: &Path, category: ResourceCategory) -> Result<Vec<String>> {
    if !bundle_dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: bundle_dir.to_path_buf(),
        });
    }
    let category_dir = bundle_dir.join(category.as_dir());
    if !category_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&category_dir).map_err(|source| IngestError::DirectoryRead {
        path: category_dir.clone(),
        source,
    })?;

    let mut names = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: category_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Discover every localized resource file in a category folder.
///
/// Filenames that do not follow the `name+language-REGION.ext` convention
/// are skipped (the codec logs a warning for each).
pub fn discover_category(
    bundle_dir: &Path,
    category: ResourceCategory,
) -> Result<Vec<CandidateFile>> {
    let category_dir = bundle_dir.join(category.as_dir());
    let mut candidates = Vec::new();
    for filename in list_category_files(bundle_dir, category)? {
        let Some(parsed) = parse_localized_filename(&filename) else {
            continue;
        };
        let reference = FileReference::new(category, parsed.name, parsed.extension)
            .localized(parsed.localization);
        candidates.push(CandidateFile {
            path: category_dir.join(&filename),
            reference,
        });
    }
    debug!(
        category = %category,
        count = candidates.len(),
        "discovered localized resource files"
    );
    Ok(candidates)
}

/// Discover the localizations of one logical resource.
pub fn discover_localizations(
    bundle_dir: &Path,
    file_ref: &FileReference,
) -> Result<Vec<CandidateFile>> {
    let mut candidates = discover_category(bundle_dir, file_ref.category)?;
    candidates.retain(|candidate| candidate.reference.file_ref == *file_ref);
    Ok(candidates)
}

/// Group a category's candidates into resource families, keyed by their
/// locale-independent reference. The map and each family list are ordered,
/// so iteration is deterministic.
pub fn discover_families(
    bundle_dir: &Path,
    category: ResourceCategory,
) -> Result<BTreeMap<FileReference, Vec<CandidateFile>>> {
    let mut families: BTreeMap<FileReference, Vec<CandidateFile>> = BTreeMap::new();
    for candidate in discover_category(bundle_dir, category)? {
        families
            .entry(candidate.reference.file_ref.clone())
            .or_default()
            .push(candidate);
    }
    Ok(families)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_bundle() -> TempDir {
        let dir = TempDir::new().unwrap();
        let questionnaires = dir.path().join("questionnaires");
        std::fs::create_dir_all(&questionnaires).unwrap();
        for name in [
            "phq9+en-US.json",
            "phq9+de-DE.json",
            "gad7+en-US.json",
            "notes.txt",
            "broken+es.json",
        ] {
            std::fs::write(questionnaires.join(name), b"{}").unwrap();
        }
        dir
    }

    #[test]
    fn lists_files_sorted() {
        let bundle = create_bundle();
        let names = list_category_files(bundle.path(), ResourceCategory::Questionnaire).unwrap();
        assert_eq!(names.len(), 5);
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn missing_category_folder_is_empty() {
        let bundle = create_bundle();
        let names = list_category_files(bundle.path(), ResourceCategory::Article).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn missing_bundle_root_is_an_error() {
        let result = list_category_files(Path::new("/nonexistent"), ResourceCategory::Article);
        assert!(matches!(
            result,
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn discovery_skips_malformed_names() {
        let bundle = create_bundle();
        let candidates =
            discover_category(bundle.path(), ResourceCategory::Questionnaire).unwrap();
        assert_eq!(candidates.len(), 3);
        assert!(
            candidates
                .iter()
                .all(|candidate| candidate.path.is_file())
        );
    }

    #[test]
    fn localizations_are_filtered_to_one_family() {
        let bundle = create_bundle();
        let file_ref = FileReference::new(ResourceCategory::Questionnaire, "phq9", "json");
        let candidates = discover_localizations(bundle.path(), &file_ref).unwrap();
        let localizations: Vec<String> = candidates
            .iter()
            .map(|candidate| candidate.reference.localization.to_string())
            .collect();
        assert_eq!(localizations, vec!["de-DE", "en-US"]);
    }

    #[test]
    fn families_group_by_logical_reference() {
        let bundle = create_bundle();
        let families =
            discover_families(bundle.path(), ResourceCategory::Questionnaire).unwrap();
        assert_eq!(families.len(), 2);
        let phq9 = FileReference::new(ResourceCategory::Questionnaire, "phq9", "json");
        assert_eq!(families.get(&phq9).map(Vec::len), Some(2));
    }
}
