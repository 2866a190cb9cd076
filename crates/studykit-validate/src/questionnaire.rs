//! Structural checks for questionnaire documents.
//!
//! Two passes run per resource family: a single-locale completeness check
//! over every localization, and a cross-locale diff of each localization
//! against the chosen base. Both accumulate soft issues and never abort
//! mid-walk.

use studykit_model::{
    DocumentNode, FieldPath, FieldValue, Issue, LocalizationKey, LocalizedFileReference, Scalar,
    StructuredDocument,
};

use crate::fields;

/// Verify required top-level fields and per-item completeness of one
/// localization.
pub fn check_questionnaire(
    document: &StructuredDocument,
    at: &LocalizedFileReference,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let root = &document.root;
    let path = FieldPath::root();

    if root.text_field(fields::ID).is_none() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::ID)));
    }
    if root.text_field(fields::TITLE).is_none() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::TITLE)));
    }
    if root.nodes(fields::ITEM).is_empty() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::ITEM)));
    }
    check_declared_language(root.str_field(fields::LANGUAGE), at, &path, &mut issues);

    let items_path = path.field(fields::ITEM);
    for (index, item) in root.nodes(fields::ITEM).iter().enumerate() {
        check_item(item, &items_path.index(index), at, &mut issues);
    }
    issues
}

/// Declared language metadata must parse as a localization and agree with
/// the localization encoded in the filename. Absent metadata is fine.
pub fn check_declared_language(
    declared: Option<&str>,
    at: &LocalizedFileReference,
    path: &FieldPath,
    issues: &mut Vec<Issue>,
) {
    let Some(declared) = declared else {
        return;
    };
    match declared.parse::<LocalizationKey>() {
        Ok(declared) => {
            if declared != at.localization {
                issues.push(Issue::language_mismatch(
                    at.clone(),
                    path.field(fields::LANGUAGE),
                    declared,
                ));
            }
        }
        Err(_) => {
            issues.push(Issue::invalid_field(
                at.clone(),
                path.field(fields::LANGUAGE),
                FieldValue::String(declared.to_string()),
            ));
        }
    }
}

fn check_item(
    item: &DocumentNode,
    path: &FieldPath,
    at: &LocalizedFileReference,
    issues: &mut Vec<Issue>,
) {
    if item.text_field(fields::LINK_ID).is_none() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::LINK_ID)));
    }
    let is_grouping = item.str_field(fields::TYPE) == Some(fields::TYPE_GROUP);
    if !is_grouping && item.text_field(fields::TEXT).is_none() {
        issues.push(Issue::missing_field(at.clone(), path.field(fields::TEXT)));
    }
    let nested_path = path.field(fields::ITEM);
    for (index, nested) in item.nodes(fields::ITEM).iter().enumerate() {
        check_item(nested, &nested_path.index(index), at, issues);
    }
}

/// Diff one localization against the base. Only fields that must be
/// identical across localizations participate; translated text does not.
pub fn compare_questionnaires(
    base: &StructuredDocument,
    base_ref: &LocalizedFileReference,
    other: &StructuredDocument,
    other_ref: &LocalizedFileReference,
) -> Vec<Issue> {
    let mut diff = Diff {
        base_ref,
        other_ref,
        issues: Vec::new(),
    };
    let path = FieldPath::root();
    diff.scalar(&base.root, &other.root, &path, fields::ID, identifier_value);
    diff.items(
        base.root.nodes(fields::ITEM),
        other.root.nodes(fields::ITEM),
        &path.field(fields::ITEM),
    );
    diff.issues
}

struct Diff<'a> {
    base_ref: &'a LocalizedFileReference,
    other_ref: &'a LocalizedFileReference,
    issues: Vec<Issue>,
}

impl Diff<'_> {
    fn push(&mut self, path: FieldPath, base_value: FieldValue, other_value: FieldValue) {
        self.issues.push(Issue::mismatching_field_values(
            self.base_ref.clone(),
            self.other_ref.clone(),
            path,
            base_value,
            other_value,
        ));
    }

    fn scalar(
        &mut self,
        base: &DocumentNode,
        other: &DocumentNode,
        path: &FieldPath,
        name: &str,
        value: fn(Option<&Scalar>) -> FieldValue,
    ) {
        let base_value = value(base.scalar(name));
        let other_value = value(other.scalar(name));
        if base_value != other_value {
            self.push(path.field(name), base_value, other_value);
        }
    }

    fn flag(&mut self, base: &DocumentNode, other: &DocumentNode, path: &FieldPath, name: &str) {
        // An absent flag reads as false, so `"required": false` and an
        // omitted field do not count as drift.
        let base_value = FieldValue::Boolean(base.bool_field(name).unwrap_or(false));
        let other_value = FieldValue::Boolean(other.bool_field(name).unwrap_or(false));
        if base_value != other_value {
            self.push(path.field(name), base_value, other_value);
        }
    }

    /// Compare two item lists. Differing lengths short-circuit with a
    /// single issue at `<path>.length` instead of element-wise comparison.
    fn items(&mut self, base: &[DocumentNode], other: &[DocumentNode], path: &FieldPath) {
        if base.len() != other.len() {
            self.push(
                path.field(fields::LENGTH),
                FieldValue::Integer(base.len() as i64),
                FieldValue::Integer(other.len() as i64),
            );
            return;
        }
        for (index, (base_item, other_item)) in base.iter().zip(other).enumerate() {
            self.item(base_item, other_item, &path.index(index));
        }
    }

    fn item(&mut self, base: &DocumentNode, other: &DocumentNode, path: &FieldPath) {
        self.scalar(base, other, path, fields::LINK_ID, identifier_value);
        self.scalar(base, other, path, fields::TYPE, FieldValue::from_scalar);
        self.flag(base, other, path, fields::REQUIRED);
        self.flag(base, other, path, fields::REPEATS);
        self.flag(base, other, path, fields::READ_ONLY);
        self.scalar(base, other, path, fields::ENABLE_BEHAVIOR, FieldValue::from_scalar);
        self.enable_when(base, other, path);
        self.bounds(base, other, path);
        self.answer_options(base, other, path);
        self.items(
            base.nodes(fields::ITEM),
            other.nodes(fields::ITEM),
            &path.field(fields::ITEM),
        );
    }

    fn enable_when(&mut self, base: &DocumentNode, other: &DocumentNode, path: &FieldPath) {
        let base_conditions = base.nodes(fields::ENABLE_WHEN);
        let other_conditions = other.nodes(fields::ENABLE_WHEN);
        let conditions_path = path.field(fields::ENABLE_WHEN);
        if base_conditions.len() != other_conditions.len() {
            self.push(
                conditions_path.field(fields::LENGTH),
                FieldValue::Integer(base_conditions.len() as i64),
                FieldValue::Integer(other_conditions.len() as i64),
            );
            return;
        }
        for (index, (base_condition, other_condition)) in
            base_conditions.iter().zip(other_conditions).enumerate()
        {
            let condition_path = conditions_path.index(index);
            self.scalar(
                base_condition,
                other_condition,
                &condition_path,
                fields::QUESTION,
                identifier_value,
            );
            self.scalar(
                base_condition,
                other_condition,
                &condition_path,
                fields::OPERATOR,
                FieldValue::from_scalar,
            );
            self.scalar(
                base_condition,
                other_condition,
                &condition_path,
                fields::ANSWER,
                FieldValue::from_scalar,
            );
        }
    }

    /// Numeric bound extensions may sit directly on the item or inside its
    /// first extension block.
    fn bounds(&mut self, base: &DocumentNode, other: &DocumentNode, path: &FieldPath) {
        for name in [fields::MIN_VALUE, fields::MAX_VALUE] {
            let base_value = FieldValue::from_scalar(bound_scalar(base, name));
            let other_value = FieldValue::from_scalar(bound_scalar(other, name));
            if base_value != other_value {
                self.push(path.field(name), base_value, other_value);
            }
        }
    }

    fn answer_options(&mut self, base: &DocumentNode, other: &DocumentNode, path: &FieldPath) {
        let base_options = base.nodes(fields::ANSWER_OPTION);
        let other_options = other.nodes(fields::ANSWER_OPTION);
        let options_path = path.field(fields::ANSWER_OPTION);
        if base_options.len() != other_options.len() {
            self.push(
                options_path.field(fields::LENGTH),
                FieldValue::Integer(base_options.len() as i64),
                FieldValue::Integer(other_options.len() as i64),
            );
            return;
        }
        // Machine-readable codes must agree; display text is translated.
        for (index, (base_option, other_option)) in
            base_options.iter().zip(other_options).enumerate()
        {
            let option_path = options_path.index(index);
            self.scalar(
                base_option,
                other_option,
                &option_path,
                fields::SYSTEM,
                FieldValue::from_scalar,
            );
            self.scalar(
                base_option,
                other_option,
                &option_path,
                fields::CODE,
                FieldValue::from_scalar,
            );
        }
    }
}

fn bound_scalar<'a>(item: &'a DocumentNode, name: &str) -> Option<&'a Scalar> {
    item.scalar(name).or_else(|| {
        item.nodes(fields::EXTENSION)
            .first()
            .and_then(|extension| extension.scalar(name))
    })
}

fn identifier_value(scalar: Option<&Scalar>) -> FieldValue {
    match scalar.and_then(Scalar::as_str) {
        Some(value) => FieldValue::Identifier(value.to_string()),
        None => FieldValue::from_scalar(scalar),
    }
}
