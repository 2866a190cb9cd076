//! Locale-independent resource identity.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::filename::{ParsedFilename, localized_filename};
use crate::localization::LocalizationKey;

/// Bundle resource categories. Each category doubles as the name of the
/// bundle sub-directory holding its localized files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    /// Informational articles shown during the study.
    Article,
    /// Structured questionnaires.
    Questionnaire,
    /// Consent documents presented at enrollment.
    Consent,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Article,
        ResourceCategory::Questionnaire,
        ResourceCategory::Consent,
    ];

    /// The bundle sub-directory for this category.
    pub fn as_dir(&self) -> &'static str {
        match self {
            ResourceCategory::Article => "articles",
            ResourceCategory::Questionnaire => "questionnaires",
            ResourceCategory::Consent => "consent",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_dir())
    }
}

impl FromStr for ResourceCategory {
    type Err = ModelError;

    /// Parse a category name; accepts both the singular and the directory
    /// form, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" => Ok(ResourceCategory::Article),
            "questionnaire" | "questionnaires" => Ok(ResourceCategory::Questionnaire),
            "consent" => Ok(ResourceCategory::Consent),
            _ => Err(ModelError::InvalidCategory(s.to_string())),
        }
    }
}

/// The locale-independent identity of a resource: one `FileReference`
/// names a family of localized files within a bundle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileReference {
    pub category: ResourceCategory,
    pub name: String,
    pub extension: String,
}

impl FileReference {
    pub fn new(
        category: ResourceCategory,
        name: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// True when a parsed filename belongs to this resource family.
    pub fn matches(&self, parsed: &ParsedFilename) -> bool {
        self.name == parsed.name && self.extension == parsed.extension
    }

    /// Pair this reference with a concrete localization.
    pub fn localized(&self, localization: LocalizationKey) -> LocalizedFileReference {
        LocalizedFileReference {
            file_ref: self.clone(),
            localization,
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extension.is_empty() {
            write!(f, "{}/{}", self.category.as_dir(), self.name)
        } else {
            write!(f, "{}/{}.{}", self.category.as_dir(), self.name, self.extension)
        }
    }
}

/// One concrete localized file: a [`FileReference`] plus the localization
/// of the physical file it names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalizedFileReference {
    pub file_ref: FileReference,
    pub localization: LocalizationKey,
}

impl LocalizedFileReference {
    /// The physical filename for this reference.
    pub fn filename(&self) -> String {
        localized_filename(
            &self.file_ref.name,
            &self.localization,
            &self.file_ref.extension,
        )
    }

    /// Path of this file relative to the bundle root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.file_ref.category.as_dir()).join(self.filename())
    }
}

impl fmt::Display for LocalizedFileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.file_ref.category.as_dir(), self.filename())
    }
}
