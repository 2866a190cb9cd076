//! CLI argument definitions for the study bundle toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "studykit",
    version,
    about = "Study bundle toolkit - resolve and validate localized study resources",
    long_about = "Author localized study bundles.\n\n\
                  Resolves logical resource references to concrete localized files\n\
                  and checks every localization of a bundle for structural drift\n\
                  against a base localization before the bundle ships."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a bundle's localizations against its study definition.
    Validate(ValidateArgs),

    /// Resolve one resource reference for a requested locale.
    Resolve(ResolveArgs),

    /// List the definition's resources and their discovered localizations.
    Resources(ResourcesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the bundle directory containing study.json.
    #[arg(value_name = "BUNDLE")]
    pub bundle_dir: PathBuf,

    /// Base localization for cross-locale comparison (default: the
    /// definition's default localization).
    #[arg(long = "base", value_name = "LL-RR")]
    pub base: Option<String>,

    /// Write a machine-readable validation report into this directory.
    #[arg(long = "report-json", value_name = "DIR")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Path to the bundle directory.
    #[arg(value_name = "BUNDLE")]
    pub bundle_dir: PathBuf,

    /// Resource category (articles, questionnaires, consent).
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Logical resource as name.extension (e.g. phq9.json).
    #[arg(value_name = "RESOURCE")]
    pub resource: String,

    /// Requested locale, e.g. de-DE.
    #[arg(long = "locale", value_name = "LL-RR")]
    pub locale: String,

    /// Locale matching policy.
    #[arg(long = "policy", value_enum, default_value = "prefer-language")]
    pub policy: PolicyArg,

    /// Localization to fall back to when no candidate matches closely
    /// enough.
    #[arg(long = "fallback", value_name = "LL-RR")]
    pub fallback: Option<String>,
}

#[derive(Parser)]
pub struct ResourcesArgs {
    /// Path to the bundle directory containing study.json.
    #[arg(value_name = "BUNDLE")]
    pub bundle_dir: PathBuf,
}

/// CLI locale matching policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Only exact language + region matches.
    Exact,
    /// Prefer language matches over region matches.
    PreferLanguage,
    /// Prefer region matches over language matches.
    PreferRegion,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
