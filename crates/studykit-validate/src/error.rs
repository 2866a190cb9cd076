use studykit_ingest::IngestError;
use studykit_model::FileReference;
use thiserror::Error;

/// Hard validation errors. Unlike soft [`studykit_model::Issue`]s these
/// indicate an unreadable bundle: they abort the current resource family
/// but not its siblings.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("no localized files found for {reference}")]
    NoLocalizations { reference: FileReference },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
