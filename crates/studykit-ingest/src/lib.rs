mod decode;
mod discovery;
mod error;

pub use decode::{load_article_document, load_structured_document};
pub use discovery::{
    CandidateFile, discover_category, discover_families, discover_localizations,
    list_category_files,
};
pub use error::{IngestError, Result};
