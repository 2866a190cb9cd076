//! Validation diagnostics: structural paths, reported values, and issues.

use std::fmt;

use serde::Serialize;

use crate::document::Scalar;
use crate::localization::LocalizationKey;
use crate::reference::LocalizedFileReference;

/// One element of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Field(String),
    Index(usize),
}

/// A structural location inside a document.
///
/// Built incrementally while walking a document; the builders return a new
/// path and never mutate the receiver, so multiple diagnostics may share a
/// prefix. Renders as `item[2].text`, or `root` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    elements: Vec<PathElement>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with a named field appended.
    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::Field(name.into()));
        Self { elements }
    }

    /// A new path with an array index appended.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::Index(index));
        Self { elements }
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("root");
        }
        for (position, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::Field(name) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A field value carried by a diagnostic, closed over the scalar kinds
/// actually reported. Two values are equal only when both kind and payload
/// match, so `Integer(5)` never equates with `String("5")`. Used purely for
/// reporting, never for control flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    Absent,
    String(String),
    Integer(i64),
    Boolean(bool),
    Identifier(String),
    Url(String),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Wrap a document scalar for reporting; `None` becomes `Absent` and
    /// non-integral numbers are rendered through their string form.
    pub fn from_scalar(scalar: Option<&Scalar>) -> Self {
        match scalar {
            None => FieldValue::Absent,
            Some(Scalar::String(value)) => FieldValue::String(value.clone()),
            Some(Scalar::Integer(value)) => FieldValue::Integer(*value),
            Some(Scalar::Boolean(value)) => FieldValue::Boolean(*value),
            Some(Scalar::Number(value)) => {
                if value.fract() == 0.0 && value.is_finite() {
                    FieldValue::Integer(*value as i64)
                } else {
                    FieldValue::String(value.to_string())
                }
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("absent"),
            FieldValue::String(value) => write!(f, "{value:?}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Identifier(value) | FieldValue::Url(value) => f.write_str(value),
        }
    }
}

/// A single validation defect found in a bundle.
///
/// Issues are soft diagnostics: the validator accumulates them and the
/// caller decides whether a non-empty list rejects the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Issue {
    General(GeneralIssue),
    Article(ArticleIssue),
    Questionnaire(QuestionnaireIssue),
}

/// Defects applicable to any localized document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GeneralIssue {
    /// A required field is absent.
    MissingField {
        at: LocalizedFileReference,
        path: FieldPath,
    },
    /// A field is present but its value is unusable.
    InvalidField {
        at: LocalizedFileReference,
        path: FieldPath,
        value: FieldValue,
    },
    /// A structural field differs from the base localization.
    MismatchingFieldValues {
        base: LocalizedFileReference,
        localized: LocalizedFileReference,
        path: FieldPath,
        base_value: FieldValue,
        localized_value: FieldValue,
    },
    /// The document's declared language differs from the localization
    /// encoded in its filename.
    LanguageMismatch {
        at: LocalizedFileReference,
        path: FieldPath,
        declared: LocalizationKey,
    },
}

/// Defects specific to article-like documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ArticleIssue {
    /// A metadata key present in the base localization is missing here.
    MissingMetadata {
        base: LocalizedFileReference,
        localized: LocalizedFileReference,
        path: FieldPath,
    },
    /// The article body is empty.
    EmptyBody { at: LocalizedFileReference },
}

/// Defects specific to questionnaire documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum QuestionnaireIssue {
    /// Two choice options within one localization share a coding system and
    /// code but disagree on display text.
    ConflictingFieldValues {
        at: LocalizedFileReference,
        system: String,
        code: String,
        first_path: FieldPath,
        first_value: FieldValue,
        second_path: FieldPath,
        second_value: FieldValue,
    },
}

impl Issue {
    pub fn missing_field(at: LocalizedFileReference, path: FieldPath) -> Self {
        Issue::General(GeneralIssue::MissingField { at, path })
    }

    pub fn invalid_field(at: LocalizedFileReference, path: FieldPath, value: FieldValue) -> Self {
        Issue::General(GeneralIssue::InvalidField { at, path, value })
    }

    pub fn mismatching_field_values(
        base: LocalizedFileReference,
        localized: LocalizedFileReference,
        path: FieldPath,
        base_value: FieldValue,
        localized_value: FieldValue,
    ) -> Self {
        Issue::General(GeneralIssue::MismatchingFieldValues {
            base,
            localized,
            path,
            base_value,
            localized_value,
        })
    }

    pub fn language_mismatch(
        at: LocalizedFileReference,
        path: FieldPath,
        declared: LocalizationKey,
    ) -> Self {
        Issue::General(GeneralIssue::LanguageMismatch { at, path, declared })
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::General(issue) => issue.fmt(f),
            Issue::Article(issue) => issue.fmt(f),
            Issue::Questionnaire(issue) => issue.fmt(f),
        }
    }
}

impl fmt::Display for GeneralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralIssue::MissingField { at, path } => {
                writeln!(f, "missing required field")?;
                writeln!(f, "  file: {at}")?;
                write!(f, "  path: {path}")
            }
            GeneralIssue::InvalidField { at, path, value } => {
                writeln!(f, "invalid field value")?;
                writeln!(f, "  file: {at}")?;
                writeln!(f, "  path: {path}")?;
                write!(f, "  value: {value}")
            }
            GeneralIssue::MismatchingFieldValues {
                base,
                localized,
                path,
                base_value,
                localized_value,
            } => {
                writeln!(f, "field value differs from base localization")?;
                writeln!(f, "  base: {base}")?;
                writeln!(f, "  localized: {localized}")?;
                write!(f, "  path: {path}")?;
                if !(base_value.is_absent() && localized_value.is_absent()) {
                    writeln!(f)?;
                    writeln!(f, "  base value: {base_value}")?;
                    write!(f, "  localized value: {localized_value}")?;
                }
                Ok(())
            }
            GeneralIssue::LanguageMismatch { at, path, declared } => {
                writeln!(f, "declared language differs from filename localization")?;
                writeln!(f, "  file: {at}")?;
                writeln!(f, "  path: {path}")?;
                write!(f, "  declared: {declared}")
            }
        }
    }
}

impl fmt::Display for ArticleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleIssue::MissingMetadata {
                base,
                localized,
                path,
            } => {
                writeln!(f, "metadata key from base localization is missing")?;
                writeln!(f, "  base: {base}")?;
                writeln!(f, "  localized: {localized}")?;
                write!(f, "  path: {path}")
            }
            ArticleIssue::EmptyBody { at } => {
                writeln!(f, "article body is empty")?;
                write!(f, "  file: {at}")
            }
        }
    }
}

impl fmt::Display for QuestionnaireIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionnaireIssue::ConflictingFieldValues {
                at,
                system,
                code,
                first_path,
                first_value,
                second_path,
                second_value,
            } => {
                writeln!(f, "conflicting field values for one choice option")?;
                writeln!(f, "  file: {at}")?;
                writeln!(f, "  system: {system}")?;
                writeln!(f, "  code: {code}")?;
                writeln!(f, "  first: {first_path} = {first_value}")?;
                write!(f, "  second: {second_path} = {second_value}")
            }
        }
    }
}
