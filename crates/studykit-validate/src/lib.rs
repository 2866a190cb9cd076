mod article;
mod choice;
mod error;
mod family;
pub mod fields;
mod questionnaire;
mod report;

pub use article::{check_article, compare_articles};
pub use choice::{ObservedOption, collect_options, find_conflicts};
pub use error::{Result, ValidateError};
pub use family::{ValidationOptions, select_base, validate_bundle, validate_family};
pub use questionnaire::{check_questionnaire, compare_questionnaires};
pub use report::{
    FamilyFailure, FamilyPayload, FamilyReport, IssuePayload, ValidationReport,
    ValidationReportPayload, write_validation_report_json,
};
