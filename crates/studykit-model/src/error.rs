use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid localization {0:?}: expected <language>-<REGION> with both parts non-empty")]
    InvalidLocalization(String),
    #[error("unknown resource category: {0}")]
    InvalidCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
