pub mod document;
pub mod error;
pub mod filename;
pub mod issue;
pub mod localization;
pub mod reference;

pub use document::{ArticleDocument, DocumentNode, Scalar, StructuredDocument};
pub use error::{ModelError, Result};
pub use filename::{
    LOCALIZATION_SEPARATOR, ParsedFilename, localized_filename, parse_localized_filename,
};
pub use issue::{
    ArticleIssue, FieldPath, FieldValue, GeneralIssue, Issue, PathElement, QuestionnaireIssue,
};
pub use localization::{LocaleMatchingBehaviour, LocalizationKey};
pub use reference::{FileReference, LocalizedFileReference, ResourceCategory};
