//! Generic structured-document trees.
//!
//! Questionnaire-like content is modeled schema-independently as a tree of
//! nodes: each node carries scalar fields plus named, ordered lists of
//! nested nodes (`item`, `enableWhen`, `answerOption`, extension blocks).
//! Article-like content is a flat metadata map plus body text. Decoding
//! from bytes lives in the ingest crate; this module is the shape the
//! validator walks.

use std::collections::BTreeMap;

/// A scalar field value inside a structured document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

/// One node of a structured document: scalar fields plus named lists of
/// nested nodes. Field maps are ordered so walks are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentNode {
    pub scalars: BTreeMap<String, Scalar>,
    pub children: BTreeMap<String, Vec<DocumentNode>>,
}

impl DocumentNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style scalar assignment, used by decoders and tests.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value: Scalar) -> Self {
        self.scalars.insert(name.into(), value);
        self
    }

    /// Builder-style nested-node append.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, node: DocumentNode) -> Self {
        self.children.entry(name.into()).or_default().push(node);
        self
    }

    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.scalars.get(name)
    }

    /// String value of a scalar field, when present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.scalars.get(name).and_then(Scalar::as_str)
    }

    /// Non-empty string value of a scalar field.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.str_field(name).filter(|value| !value.trim().is_empty())
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.scalars.get(name).and_then(Scalar::as_bool)
    }

    /// The named nested-node list; empty when the field is absent.
    pub fn nodes(&self, name: &str) -> &[DocumentNode] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A parsed questionnaire-like document: the root of a generic tree of
/// nested items with scalar fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredDocument {
    pub root: DocumentNode,
}

impl StructuredDocument {
    pub fn new(root: DocumentNode) -> Self {
        Self { root }
    }
}

/// A parsed article-like document: flat string-keyed metadata plus body
/// text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDocument {
    pub metadata: BTreeMap<String, String>,
    pub body: String,
}
