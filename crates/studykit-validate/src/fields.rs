//! Well-known field names of questionnaire documents.
//!
//! The document model is schema-independent; the validator owns the
//! vocabulary it checks.

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const LANGUAGE: &str = "language";
pub const ITEM: &str = "item";
pub const LENGTH: &str = "length";
pub const LINK_ID: &str = "linkId";
pub const TEXT: &str = "text";
pub const TYPE: &str = "type";
pub const REQUIRED: &str = "required";
pub const REPEATS: &str = "repeats";
pub const READ_ONLY: &str = "readOnly";
pub const ENABLE_WHEN: &str = "enableWhen";
pub const ENABLE_BEHAVIOR: &str = "enableBehavior";
pub const QUESTION: &str = "question";
pub const OPERATOR: &str = "operator";
pub const ANSWER: &str = "answer";
pub const ANSWER_OPTION: &str = "answerOption";
pub const SYSTEM: &str = "system";
pub const CODE: &str = "code";
pub const DISPLAY: &str = "display";
pub const EXTENSION: &str = "extension";
pub const MIN_VALUE: &str = "minValue";
pub const MAX_VALUE: &str = "maxValue";

/// Item type whose nodes only group nested items and carry no
/// question text of their own.
pub const TYPE_GROUP: &str = "group";
