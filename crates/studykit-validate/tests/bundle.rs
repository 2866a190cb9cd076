//! End-to-end bundle validation against a directory fixture.

use std::path::Path;

use tempfile::TempDir;

use studykit_model::{FileReference, LocalizationKey, ResourceCategory};
use studykit_validate::{
    ValidationOptions, validate_bundle, validate_family, write_validation_report_json,
};

const PHQ9_EN: &str = r#"{
  "id": "phq9",
  "title": "Patient Health Questionnaire",
  "language": "en-US",
  "item": [
    {"linkId": "q1", "type": "choice", "text": "Little interest or pleasure",
     "answerOption": [
       {"system": "urn:phq", "code": "0", "display": "Not at all"},
       {"system": "urn:phq", "code": "1", "display": "Several days"}
     ]},
    {"linkId": "q2", "type": "integer", "text": "Rate your sleep",
     "extension": {"minValue": 0, "maxValue": 27}}
  ]
}"#;

const PHQ9_DE: &str = r#"{
  "id": "phq9",
  "title": "Gesundheitsfragebogen für Patienten",
  "language": "de-DE",
  "item": [
    {"linkId": "q1", "type": "choice", "text": "Wenig Interesse oder Freude",
     "answerOption": [
       {"system": "urn:phq", "code": "0", "display": "Überhaupt nicht"},
       {"system": "urn:phq", "code": "1", "display": "An einzelnen Tagen"}
     ]},
    {"linkId": "q2", "type": "integer", "text": "Bewerten Sie Ihren Schlaf",
     "extension": {"minValue": 0, "maxValue": 27}},
    {"linkId": "q3", "type": "string", "text": "Sonstige Anmerkungen"}
  ]
}"#;

fn write(bundle: &Path, relative: &str, contents: &str) {
    let path = bundle.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn create_bundle() -> TempDir {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path();
    write(bundle, "questionnaires/phq9+en-US.json", PHQ9_EN);
    write(bundle, "questionnaires/phq9+de-DE.json", PHQ9_DE);
    write(bundle, "questionnaires/gad7+en-US.json", "{not json");
    write(
        bundle,
        "articles/welcome+en-US.md",
        "---\ntitle: Welcome\nlanguage: en-US\n---\nThanks for joining the study.\n",
    );
    write(
        bundle,
        "articles/welcome+de-DE.md",
        "---\ntitle: Willkommen\nlanguage: de-DE\n---\nDanke für Ihre Teilnahme.\n",
    );
    write(
        bundle,
        "consent/consent+en-US.md",
        "---\ntitle: Consent\nlanguage: en-US\n---\nBy enrolling you agree to participate.\n",
    );
    dir
}

fn references() -> Vec<FileReference> {
    vec![
        FileReference::new(ResourceCategory::Questionnaire, "phq9", "json"),
        FileReference::new(ResourceCategory::Questionnaire, "gad7", "json"),
        FileReference::new(ResourceCategory::Article, "welcome", "md"),
        FileReference::new(ResourceCategory::Consent, "consent", "md"),
    ]
}

fn options() -> ValidationOptions {
    ValidationOptions {
        default_localization: Some("en-US".parse().unwrap()),
    }
}

#[test]
fn reports_drift_and_isolates_unreadable_families() {
    let bundle = create_bundle();
    let report = validate_bundle(bundle.path(), &references(), &options()).expect("validate");

    // The unreadable family fails hard without aborting its siblings.
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reference.name, "gad7");

    let family_names: Vec<&str> = report
        .families
        .iter()
        .map(|family| family.reference.name.as_str())
        .collect();
    assert_eq!(family_names, vec!["welcome", "phq9", "consent"]);

    assert_eq!(report.issue_count(), 1);
    insta::assert_snapshot!(report.render_issues(), @r#"
    field value differs from base localization
      base: questionnaires/phq9+en-US.json
      localized: questionnaires/phq9+de-DE.json
      path: item.length
      base value: 2
      localized value: 3
    "#);
}

#[test]
fn validation_output_is_deterministic() {
    let bundle = create_bundle();
    let first = validate_bundle(bundle.path(), &references(), &options()).expect("validate");
    for _ in 0..3 {
        let again = validate_bundle(bundle.path(), &references(), &options()).expect("validate");
        assert_eq!(again.render_issues(), first.render_issues());
        assert_eq!(again.families.len(), first.families.len());
    }
}

#[test]
fn base_selection_prefers_the_designated_default() {
    let bundle = create_bundle();
    let phq9 = FileReference::new(ResourceCategory::Questionnaire, "phq9", "json");

    let report = validate_family(bundle.path(), &phq9, &options()).expect("validate");
    assert_eq!(report.base, "en-US".parse::<LocalizationKey>().unwrap());

    // Without a default the first sorted candidate becomes the base, and
    // the diff direction flips with it.
    let report = validate_family(bundle.path(), &phq9, &ValidationOptions::default())
        .expect("validate");
    assert_eq!(report.base, "de-DE".parse::<LocalizationKey>().unwrap());

    // A default with no exact candidate falls back to a language match.
    let report = validate_family(
        bundle.path(),
        &phq9,
        &ValidationOptions {
            default_localization: Some("en-GB".parse().unwrap()),
        },
    )
    .expect("validate");
    assert_eq!(report.base, "en-US".parse::<LocalizationKey>().unwrap());
}

#[test]
fn missing_family_is_a_hard_error() {
    let bundle = create_bundle();
    let absent = FileReference::new(ResourceCategory::Questionnaire, "audit", "json");
    let report = validate_bundle(bundle.path(), &[absent.clone()], &options()).expect("validate");
    assert!(report.families.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reference, absent);
}

#[test]
fn clean_bundle_report_round_trips_as_json() {
    let bundle = create_bundle();
    let clean_refs = vec![
        FileReference::new(ResourceCategory::Article, "welcome", "md"),
        FileReference::new(ResourceCategory::Consent, "consent", "md"),
    ];
    let report = validate_bundle(bundle.path(), &clean_refs, &options()).expect("validate");
    assert!(report.is_clean());

    let output = TempDir::new().unwrap();
    let path = write_validation_report_json(output.path(), "STUDY-01", &report).expect("write");
    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).expect("parse");
    assert_eq!(payload["schema"], "studykit.validation-report");
    assert_eq!(payload["schema_version"], 1);
    assert_eq!(payload["study_id"], "STUDY-01");
    assert_eq!(payload["families"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["families"][0]["issue_count"], 0);
}
