//! Decoding candidate files into document trees.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use studykit_model::{ArticleDocument, DocumentNode, Scalar, StructuredDocument};

use crate::error::{IngestError, Result};

/// Decode a questionnaire-like JSON file into a structured document tree.
///
/// The document must be a top-level JSON object; anything else is an
/// unreadable bundle, not a localization defect.
pub fn load_structured_document(path: &Path) -> Result<StructuredDocument> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(object) = value else {
        return Err(IngestError::UnsupportedShape {
            path: path.to_path_buf(),
            message: "expected a top-level JSON object".to_string(),
        });
    };
    Ok(StructuredDocument::new(node_from_object(&object)))
}

fn node_from_object(object: &Map<String, Value>) -> DocumentNode {
    let mut node = DocumentNode::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::Bool(flag) => {
                node.scalars.insert(key.clone(), Scalar::Boolean(*flag));
            }
            Value::Number(number) => {
                let scalar = number
                    .as_i64()
                    .map(Scalar::Integer)
                    .or_else(|| number.as_f64().map(Scalar::Number));
                if let Some(scalar) = scalar {
                    node.scalars.insert(key.clone(), scalar);
                }
            }
            Value::String(text) => {
                node.scalars.insert(key.clone(), Scalar::String(text.clone()));
            }
            Value::Array(elements) => {
                node.children
                    .insert(key.clone(), nodes_from_array(elements));
            }
            Value::Object(nested) => {
                node.children
                    .insert(key.clone(), vec![node_from_object(nested)]);
            }
        }
    }
    node
}

fn nodes_from_array(elements: &[Value]) -> Vec<DocumentNode> {
    elements
        .iter()
        .filter_map(|element| match element {
            Value::Object(object) => Some(node_from_object(object)),
            // Scalar array elements keep their position as single-field
            // nodes keyed "value".
            Value::Bool(flag) => {
                Some(DocumentNode::new().with_scalar("value", Scalar::Boolean(*flag)))
            }
            Value::Number(number) => number
                .as_i64()
                .map(Scalar::Integer)
                .or_else(|| number.as_f64().map(Scalar::Number))
                .map(|scalar| DocumentNode::new().with_scalar("value", scalar)),
            Value::String(text) => {
                Some(DocumentNode::new().with_scalar("value", Scalar::String(text.clone())))
            }
            Value::Array(nested) => Some(DocumentNode {
                scalars: BTreeMap::new(),
                children: BTreeMap::from([("value".to_string(), nodes_from_array(nested))]),
            }),
            Value::Null => None,
        })
        .collect()
}

/// Decode an article-like markdown file: optional `---`-delimited YAML
/// front matter followed by the body text.
pub fn load_article_document(path: &Path) -> Result<ArticleDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let (front_matter, body) = split_front_matter(&text);
    let metadata = match front_matter {
        Some(block) => serde_norway::from_str::<BTreeMap<String, String>>(block).map_err(
            |source| IngestError::FrontMatter {
                path: path.to_path_buf(),
                source,
            },
        )?,
        None => BTreeMap::new(),
    };
    Ok(ArticleDocument {
        metadata,
        body: body.to_string(),
    })
}

/// Split a `---`-delimited front matter block from the body. Returns the
/// whole text as body when no complete block is present.
fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let Some(after_open) = text.strip_prefix("---") else {
        return (None, text);
    };
    let after_open = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'));
    let Some(after_open) = after_open else {
        return (None, text);
    };
    for (index, _) in after_open.match_indices("\n---") {
        let tail = &after_open[index + "\n---".len()..];
        let tail = tail.strip_prefix('\r').unwrap_or(tail);
        if tail.is_empty() || tail.starts_with('\n') {
            let body = tail.strip_prefix('\n').unwrap_or(tail);
            return (Some(&after_open[..index]), body);
        }
    }
    (None, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn decodes_questionnaire_tree() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "phq9+en-US.json",
            r#"{
                "id": "phq9",
                "title": "Patient Health Questionnaire",
                "language": "en-US",
                "item": [
                    {"linkId": "q1", "type": "choice", "required": true,
                     "answerOption": [{"system": "urn:x", "code": "a", "display": "Not at all"}]},
                    {"linkId": "q2", "type": "integer"}
                ]
            }"#,
        );
        let document = load_structured_document(&path).unwrap();
        let root = &document.root;
        assert_eq!(root.str_field("id"), Some("phq9"));
        assert_eq!(root.nodes("item").len(), 2);
        let first = &root.nodes("item")[0];
        assert_eq!(first.bool_field("required"), Some(true));
        assert_eq!(first.nodes("answerOption")[0].str_field("code"), Some("a"));
    }

    #[test]
    fn nested_single_objects_become_one_element_lists() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "doc+en-US.json", r#"{"meta": {"version": 2}}"#);
        let document = load_structured_document(&path).unwrap();
        let meta = document.root.nodes("meta");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].scalar("version"), Some(&Scalar::Integer(2)));
    }

    #[test]
    fn malformed_json_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad+en-US.json", "{not json");
        assert!(matches!(
            load_structured_document(&path),
            Err(IngestError::Json { .. })
        ));
    }

    #[test]
    fn top_level_array_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "list+en-US.json", "[1, 2]");
        assert!(matches!(
            load_structured_document(&path),
            Err(IngestError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn decodes_article_with_front_matter() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "welcome+en-US.md",
            "---\ntitle: Welcome\nlanguage: en-US\n---\n\n# Hello\n\nBody text.\n",
        );
        let article = load_article_document(&path).unwrap();
        assert_eq!(article.metadata.get("title").map(String::as_str), Some("Welcome"));
        assert!(article.body.starts_with("\n# Hello"));
    }

    #[test]
    fn article_without_front_matter_is_all_body() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "welcome+en-US.md", "# Hello\n");
        let article = load_article_document(&path).unwrap();
        assert!(article.metadata.is_empty());
        assert_eq!(article.body, "# Hello\n");
    }

    #[test]
    fn unterminated_front_matter_is_all_body() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "welcome+en-US.md", "---\ntitle: Welcome\n");
        let article = load_article_document(&path).unwrap();
        assert!(article.metadata.is_empty());
        assert!(article.body.starts_with("---"));
    }
}
