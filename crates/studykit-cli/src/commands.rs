//! Command implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use studykit_ingest::discover_localizations;
use studykit_model::{FileReference, LocaleMatchingBehaviour, LocalizationKey, ResourceCategory};
use studykit_resolve::Resolver;
use studykit_validate::{
    ValidationOptions, ValidationReport, validate_bundle, write_validation_report_json,
};

use crate::cli::{PolicyArg, ResolveArgs, ResourcesArgs, ValidateArgs};
use crate::definition::StudyDefinition;
use crate::summary::apply_table_style;

/// Everything `validate` produces for the summary printer.
pub struct ValidateResult {
    pub study_id: String,
    pub report: ValidationReport,
    pub report_path: Option<PathBuf>,
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let definition = StudyDefinition::load(&args.bundle_dir)?;
    let span = info_span!("validate", study_id = %definition.study_id);
    let _guard = span.enter();

    let base = match &args.base {
        Some(raw) => Some(parse_locale(raw)?),
        None => definition.default_localization.clone(),
    };
    let options = ValidationOptions {
        default_localization: base,
    };
    let report = validate_bundle(&args.bundle_dir, &definition.resources, &options)?;
    info!(
        families = report.families.len(),
        issues = report.issue_count(),
        failures = report.failures.len(),
        "bundle validated"
    );
    let report_path = match &args.report_json {
        Some(dir) => Some(write_validation_report_json(
            dir,
            &definition.study_id,
            &report,
        )?),
        None => None,
    };
    Ok(ValidateResult {
        study_id: definition.study_id,
        report,
        report_path,
    })
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let category: ResourceCategory = args.category.parse()?;
    let (name, extension) = args
        .resource
        .rsplit_once('.')
        .unwrap_or((args.resource.as_str(), ""));
    let file_ref = FileReference::new(category, name, extension);
    let requested = parse_locale(&args.locale)?;
    let fallback = args
        .fallback
        .as_deref()
        .map(parse_locale)
        .transpose()?;
    let behaviour = match args.policy {
        PolicyArg::Exact => LocaleMatchingBehaviour::RequirePerfectMatch,
        PolicyArg::PreferLanguage => LocaleMatchingBehaviour::PreferLanguageMatch,
        PolicyArg::PreferRegion => LocaleMatchingBehaviour::PreferRegionMatch,
    };

    let resolver = Resolver::new(&args.bundle_dir)
        .with_behaviour(behaviour)
        .with_fallback(fallback);
    let resolution = resolver.resolve(&file_ref, &requested)?;
    println!("{}", resolution.path.display());
    println!("localization: {}", resolution.reference.localization);
    Ok(())
}

pub fn run_resources(args: &ResourcesArgs) -> Result<()> {
    let definition = StudyDefinition::load(&args.bundle_dir)?;
    let mut resources: Vec<FileReference> = definition.resources.clone();
    resources.sort();

    let mut table = Table::new();
    table.set_header(vec!["Resource", "Localizations"]);
    apply_table_style(&mut table);
    for file_ref in &resources {
        let candidates = discover_localizations(&args.bundle_dir, file_ref)
            .with_context(|| format!("discover localizations of {file_ref}"))?;
        let localizations = if candidates.is_empty() {
            "(none)".to_string()
        } else {
            candidates
                .iter()
                .map(|candidate| candidate.reference.localization.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![Cell::new(file_ref.to_string()), Cell::new(localizations)]);
    }
    println!("{table}");
    Ok(())
}

fn parse_locale(raw: &str) -> Result<LocalizationKey> {
    raw.parse()
        .with_context(|| format!("invalid locale {raw:?}"))
}
