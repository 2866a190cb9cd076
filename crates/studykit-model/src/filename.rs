//! The `<name>+<language>-<REGION>.<ext>` filename convention.
//!
//! Every localized resource file is addressed by this naming scheme inside
//! its category folder. Parsing recovers the logical (unlocalized) name and
//! the localization; encoding reconstructs the physical filename. The
//! scheme is the only persisted format this engine defines and must remain
//! stable.

use tracing::warn;

use crate::localization::LocalizationKey;

/// Separator between the logical name and the localization suffix.
pub const LOCALIZATION_SEPARATOR: char = '+';

/// A physical filename split into its logical and localized parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    /// Logical name with the localization suffix removed.
    pub name: String,
    /// Localization encoded in the filename.
    pub localization: LocalizationKey,
    /// File extension without the leading dot; empty when absent.
    pub extension: String,
}

/// Parse a physical filename of the form `<name>+<language>-<REGION>.<ext>`.
///
/// Returns `None` (after logging a warning) when the separator is absent or
/// the localization suffix does not parse, so malformed files are excluded
/// from candidate sets without aborting discovery.
pub fn parse_localized_filename(filename: &str) -> Option<ParsedFilename> {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) => (stem, extension),
        None => (filename, ""),
    };
    let Some((name, suffix)) = stem.rsplit_once(LOCALIZATION_SEPARATOR) else {
        warn!(filename, "filename has no localization separator; skipped");
        return None;
    };
    if name.is_empty() {
        warn!(filename, "filename has an empty logical name; skipped");
        return None;
    }
    let localization = match suffix.parse::<LocalizationKey>() {
        Ok(localization) => localization,
        Err(error) => {
            warn!(filename, %error, "filename localization suffix did not parse; skipped");
            return None;
        }
    };
    Some(ParsedFilename {
        name: name.to_string(),
        localization,
        extension: extension.to_string(),
    })
}

/// Reconstruct the physical filename for a logical name, localization, and
/// extension. Inverse of [`parse_localized_filename`] for well-formed names.
pub fn localized_filename(name: &str, localization: &LocalizationKey, extension: &str) -> String {
    if extension.is_empty() {
        format!("{name}{LOCALIZATION_SEPARATOR}{localization}")
    } else {
        format!("{name}{LOCALIZATION_SEPARATOR}{localization}.{extension}")
    }
}
