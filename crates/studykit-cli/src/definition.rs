//! The study definition file shipped at the bundle root.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studykit_model::{FileReference, LocalizationKey};

/// Filename of the study definition inside a bundle.
pub const DEFINITION_FILENAME: &str = "study.json";

/// The study definition: the logical resources a bundle must ship, plus
/// the localization treated as ground truth during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyDefinition {
    pub study_id: String,
    #[serde(default)]
    pub default_localization: Option<LocalizationKey>,
    #[serde(default)]
    pub resources: Vec<FileReference>,
}

impl StudyDefinition {
    /// Read `study.json` from the bundle root.
    pub fn load(bundle_dir: &Path) -> Result<Self> {
        let path = bundle_dir.join(DEFINITION_FILENAME);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read study definition {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parse study definition {}", path.display()))
    }
}
