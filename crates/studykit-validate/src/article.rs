//! Structural checks for article-like documents (articles, consent text).

use studykit_model::{
    ArticleDocument, ArticleIssue, FieldPath, FieldValue, Issue, LocalizedFileReference,
};

use crate::fields;
use crate::questionnaire::check_declared_language;

/// Verify required metadata and a non-empty body for one localization.
pub fn check_article(article: &ArticleDocument, at: &LocalizedFileReference) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = FieldPath::root();

    let title = article
        .metadata
        .get(fields::TITLE)
        .filter(|value| !value.trim().is_empty());
    if title.is_none() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::TITLE)));
    }
    check_declared_language(
        article.metadata.get(fields::LANGUAGE).map(String::as_str),
        at,
        &path,
        &mut issues,
    );
    if article.body.trim().is_empty() {
        issues.push(Issue::Article(ArticleIssue::EmptyBody { at: at.clone() }));
    }
    issues
}

/// Diff one localization's metadata against the base. Values are
/// translated; the key sets must match.
pub fn compare_articles(
    base: &ArticleDocument,
    base_ref: &LocalizedFileReference,
    other: &ArticleDocument,
    other_ref: &LocalizedFileReference,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = FieldPath::root();
    for key in base.metadata.keys() {
        if !other.metadata.contains_key(key) {
            issues.push(Issue::Article(ArticleIssue::MissingMetadata {
                base: base_ref.clone(),
                localized: other_ref.clone(),
                path: path.field(key),
            }));
        }
    }
    for (key, value) in &other.metadata {
        if !base.metadata.contains_key(key) {
            issues.push(Issue::mismatching_field_values(
                base_ref.clone(),
                other_ref.clone(),
                path.field(key),
                FieldValue::Absent,
                FieldValue::String(value.clone()),
            ));
        }
    }
    issues
}
