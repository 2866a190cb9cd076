//! Structural validation scenarios over in-memory documents.

use studykit_model::{
    DocumentNode, FieldPath, FieldValue, FileReference, GeneralIssue, Issue,
    LocalizedFileReference, ResourceCategory, Scalar, StructuredDocument,
};
use studykit_validate::{check_questionnaire, compare_questionnaires};

fn reference(localization: &str) -> LocalizedFileReference {
    FileReference::new(ResourceCategory::Questionnaire, "phq9", "json")
        .localized(localization.parse().unwrap())
}

fn questionnaire(language: &str, items: Vec<DocumentNode>) -> StructuredDocument {
    let mut root = DocumentNode::new()
        .with_scalar("id", Scalar::String("phq9".into()))
        .with_scalar("title", Scalar::String("Patient Health Questionnaire".into()))
        .with_scalar("language", Scalar::String(language.into()));
    root.children.insert("item".to_string(), items);
    StructuredDocument::new(root)
}

fn question(link_id: &str, text: &str, kind: &str) -> DocumentNode {
    DocumentNode::new()
        .with_scalar("linkId", Scalar::String(link_id.into()))
        .with_scalar("text", Scalar::String(text.into()))
        .with_scalar("type", Scalar::String(kind.into()))
}

fn option(code: &str, display: &str) -> DocumentNode {
    DocumentNode::new()
        .with_scalar("system", Scalar::String("urn:phq".into()))
        .with_scalar("code", Scalar::String(code.into()))
        .with_scalar("display", Scalar::String(display.into()))
}

fn condition(question_id: &str, operator: &str, answer: &str) -> DocumentNode {
    DocumentNode::new()
        .with_scalar("question", Scalar::String(question_id.into()))
        .with_scalar("operator", Scalar::String(operator.into()))
        .with_scalar("answer", Scalar::String(answer.into()))
}

/// Two localizations that differ only in translated text are structurally
/// consistent.
#[test]
fn translated_text_only_differences_produce_zero_issues() {
    let base = questionnaire(
        "en-US",
        vec![
            question("q1", "Little interest or pleasure", "choice")
                .with_scalar("required", Scalar::Boolean(true))
                .with_child("answerOption", option("0", "Not at all"))
                .with_child("answerOption", option("1", "Several days")),
            question("q2", "How certain are you?", "integer")
                .with_scalar("minValue", Scalar::Integer(0))
                .with_scalar("maxValue", Scalar::Integer(27))
                .with_child("enableWhen", condition("q1", "=", "1")),
        ],
    );
    let other = questionnaire(
        "de-DE",
        vec![
            question("q1", "Wenig Interesse oder Freude", "choice")
                .with_scalar("required", Scalar::Boolean(true))
                .with_child("answerOption", option("0", "Überhaupt nicht"))
                .with_child("answerOption", option("1", "An einzelnen Tagen")),
            question("q2", "Wie sicher sind Sie?", "integer")
                .with_scalar("minValue", Scalar::Integer(0))
                .with_scalar("maxValue", Scalar::Integer(27))
                .with_child("enableWhen", condition("q1", "=", "1")),
        ],
    );

    assert!(check_questionnaire(&base, &reference("en-US")).is_empty());
    assert!(check_questionnaire(&other, &reference("de-DE")).is_empty());
    let issues =
        compare_questionnaires(&base, &reference("en-US"), &other, &reference("de-DE"));
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn missing_id_yields_exactly_one_issue_at_id() {
    let mut document = questionnaire("en-US", vec![question("q1", "Text", "string")]);
    document.root.scalars.remove("id");
    let issues = check_questionnaire(&document, &reference("en-US"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::MissingField { path, .. }) => {
            assert_eq!(path, &FieldPath::root().field("id"));
            assert_eq!(path.to_string(), "id");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

/// Item arrays of differing length short-circuit: one issue at
/// `item.length`, no element-wise comparison.
#[test]
fn item_count_mismatch_short_circuits() {
    let base = questionnaire(
        "en-US",
        vec![
            question("q1", "One", "string"),
            question("q2", "Two", "string"),
        ],
    );
    let other = questionnaire(
        "de-DE",
        vec![
            question("q1", "Eins", "string"),
            question("q2", "Zwei", "string"),
            question("q3", "Drei", "string"),
        ],
    );
    let issues =
        compare_questionnaires(&base, &reference("en-US"), &other, &reference("de-DE"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::MismatchingFieldValues {
            path,
            base_value,
            localized_value,
            ..
        }) => {
            assert_eq!(path.to_string(), "item.length");
            assert_eq!(base_value, &FieldValue::Integer(2));
            assert_eq!(localized_value, &FieldValue::Integer(3));
        }
        other => panic!("expected MismatchingFieldValues, got {other:?}"),
    }
}

#[test]
fn unparseable_declared_language_is_an_invalid_field() {
    let document = questionnaire("es", vec![question("q1", "Texto", "string")]);
    let issues = check_questionnaire(&document, &reference("es-ES"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::InvalidField { path, value, .. }) => {
            assert_eq!(path.to_string(), "language");
            assert_eq!(value, &FieldValue::String("es".into()));
        }
        other => panic!("expected InvalidField, got {other:?}"),
    }
}

#[test]
fn declared_language_must_match_the_filename_localization() {
    let document = questionnaire("en-US", vec![question("q1", "Text", "string")]);
    let issues = check_questionnaire(&document, &reference("de-DE"));
    assert_eq!(issues.len(), 1);
    assert!(matches!(
        issues[0],
        Issue::General(GeneralIssue::LanguageMismatch { .. })
    ));
}

#[test]
fn group_items_need_no_text_but_their_children_do() {
    let group = DocumentNode::new()
        .with_scalar("linkId", Scalar::String("section".into()))
        .with_scalar("type", Scalar::String("group".into()))
        .with_child("item", question("q1", "Text", "string"))
        .with_child(
            "item",
            DocumentNode::new()
                .with_scalar("linkId", Scalar::String("q2".into()))
                .with_scalar("type", Scalar::String("string".into())),
        );
    let document = questionnaire("en-US", vec![group]);
    let issues = check_questionnaire(&document, &reference("en-US"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::MissingField { path, .. }) => {
            assert_eq!(path.to_string(), "item[0].item[1].text");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn structural_flag_and_branching_drift_is_reported() {
    let base = questionnaire(
        "en-US",
        vec![
            question("q1", "One", "string").with_scalar("required", Scalar::Boolean(true)),
            question("q2", "Two", "string")
                .with_child("enableWhen", condition("q1", "=", "yes")),
        ],
    );
    let other = questionnaire(
        "de-DE",
        vec![
            question("q1", "Eins", "string"),
            question("q2", "Zwei", "string")
                .with_child("enableWhen", condition("q1", "!=", "yes")),
        ],
    );
    let issues =
        compare_questionnaires(&base, &reference("en-US"), &other, &reference("de-DE"));
    let paths: Vec<String> = issues
        .iter()
        .map(|issue| match issue {
            Issue::General(GeneralIssue::MismatchingFieldValues { path, .. }) => {
                path.to_string()
            }
            other => panic!("expected MismatchingFieldValues, got {other:?}"),
        })
        .collect();
    assert_eq!(paths, vec!["item[0].required", "item[1].enableWhen[0].operator"]);
}

#[test]
fn renamed_link_ids_are_reported_with_identifier_values() {
    let base = questionnaire("en-US", vec![question("q1", "One", "string")]);
    let other = questionnaire("de-DE", vec![question("q9", "Eins", "string")]);
    let issues =
        compare_questionnaires(&base, &reference("en-US"), &other, &reference("de-DE"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::MismatchingFieldValues {
            base_value,
            localized_value,
            ..
        }) => {
            assert_eq!(base_value, &FieldValue::Identifier("q1".into()));
            assert_eq!(localized_value, &FieldValue::Identifier("q9".into()));
        }
        other => panic!("expected MismatchingFieldValues, got {other:?}"),
    }
}

#[test]
fn numeric_bounds_may_live_in_extension_blocks() {
    let base = questionnaire(
        "en-US",
        vec![
            question("q1", "One", "integer").with_child(
                "extension",
                DocumentNode::new()
                    .with_scalar("minValue", Scalar::Integer(0))
                    .with_scalar("maxValue", Scalar::Integer(10)),
            ),
        ],
    );
    let other = questionnaire(
        "de-DE",
        vec![
            question("q1", "Eins", "integer").with_child(
                "extension",
                DocumentNode::new()
                    .with_scalar("minValue", Scalar::Integer(0))
                    .with_scalar("maxValue", Scalar::Integer(7)),
            ),
        ],
    );
    let issues =
        compare_questionnaires(&base, &reference("en-US"), &other, &reference("de-DE"));
    assert_eq!(issues.len(), 1);
    match &issues[0] {
        Issue::General(GeneralIssue::MismatchingFieldValues { path, .. }) => {
            assert_eq!(path.to_string(), "item[0].maxValue");
        }
        other => panic!("expected MismatchingFieldValues, got {other:?}"),
    }
}
