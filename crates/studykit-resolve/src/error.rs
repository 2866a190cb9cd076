use studykit_ingest::IngestError;
use studykit_model::{FileReference, LocalizationKey, LocalizedFileReference};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No candidate scored above the threshold and no configured fallback
    /// was present among the candidates. Recoverable: the caller may
    /// substitute a placeholder or report the resource missing.
    #[error("no localization of {reference} matches {requested} closely enough")]
    NotFound {
        reference: FileReference,
        requested: LocalizationKey,
    },

    /// Two or more candidates tied for the best score. This is an authoring
    /// defect: the bundle ships equally valid files for one logical
    /// resource and locale, and guessing would make builds
    /// non-deterministic.
    #[error("ambiguous localizations of {reference} for {requested}: {}", render_ties(.ties))]
    AmbiguousMatch {
        reference: FileReference,
        requested: LocalizationKey,
        ties: Vec<LocalizedFileReference>,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

fn render_ties(ties: &[LocalizedFileReference]) -> String {
    ties.iter()
        .map(|reference| reference.filename())
        .collect::<Vec<_>>()
        .join(", ")
}
