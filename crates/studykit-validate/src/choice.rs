//! Choice-option conflict detection within one localization.
//!
//! The walk collects every coded option into an explicit accumulator; a
//! pure grouping pass afterwards judges conflicts. Keeping the two steps
//! separate reports each ambiguous pair exactly once rather than once per
//! encountered location.

use std::collections::BTreeMap;

use studykit_model::{
    DocumentNode, FieldPath, FieldValue, Issue, LocalizedFileReference, QuestionnaireIssue,
    StructuredDocument,
};

use crate::fields;

/// One coded choice option observed during a single-locale walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedOption {
    pub system: String,
    pub code: String,
    pub display: String,
    /// Path of the option's display text.
    pub path: FieldPath,
}

/// Collect every `(system, code)` option in walk order.
pub fn collect_options(document: &StructuredDocument) -> Vec<ObservedOption> {
    let mut observed = Vec::new();
    let items_path = FieldPath::root().field(fields::ITEM);
    for (index, item) in document.root.nodes(fields::ITEM).iter().enumerate() {
        collect_from_item(item, &items_path.index(index), &mut observed);
    }
    observed
}

fn collect_from_item(item: &DocumentNode, path: &FieldPath, observed: &mut Vec<ObservedOption>) {
    let options_path = path.field(fields::ANSWER_OPTION);
    for (index, option) in item.nodes(fields::ANSWER_OPTION).iter().enumerate() {
        let (Some(system), Some(code)) = (
            option.str_field(fields::SYSTEM),
            option.str_field(fields::CODE),
        ) else {
            continue;
        };
        observed.push(ObservedOption {
            system: system.to_string(),
            code: code.to_string(),
            display: option.str_field(fields::DISPLAY).unwrap_or_default().to_string(),
            path: options_path.index(index).field(fields::DISPLAY),
        });
    }
    let nested_path = path.field(fields::ITEM);
    for (index, nested) in item.nodes(fields::ITEM).iter().enumerate() {
        collect_from_item(nested, &nested_path.index(index), observed);
    }
}

/// Pure post-processing over a completed walk: options sharing a coding
/// system and code but disagreeing on display text conflict. Each pair of
/// distinct display texts yields one issue.
pub fn find_conflicts(at: &LocalizedFileReference, observed: &[ObservedOption]) -> Vec<Issue> {
    let mut groups: BTreeMap<(&str, &str), Vec<&ObservedOption>> = BTreeMap::new();
    for option in observed {
        groups
            .entry((option.system.as_str(), option.code.as_str()))
            .or_default()
            .push(option);
    }

    let mut issues = Vec::new();
    for ((system, code), members) in groups {
        // First occurrence of each distinct display text, in walk order.
        let mut distinct: Vec<&ObservedOption> = Vec::new();
        for member in members {
            if !distinct.iter().any(|seen| seen.display == member.display) {
                distinct.push(member);
            }
        }
        for (position, first) in distinct.iter().enumerate() {
            for second in &distinct[position + 1..] {
                issues.push(Issue::Questionnaire(
                    QuestionnaireIssue::ConflictingFieldValues {
                        at: at.clone(),
                        system: system.to_string(),
                        code: code.to_string(),
                        first_path: first.path.clone(),
                        first_value: FieldValue::String(first.display.clone()),
                        second_path: second.path.clone(),
                        second_value: FieldValue::String(second.display.clone()),
                    },
                ));
            }
        }
    }
    issues
}
