//! Localization identity and locale matching.

use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

use crate::error::ModelError;

/// Score for a candidate matching the requested language and region.
const SCORE_EXACT: f64 = 1.0;
/// Score for a candidate matching only the component the policy prefers.
const SCORE_PREFERRED_COMPONENT: f64 = 0.8;
/// Score for a candidate matching only the other component.
const SCORE_SECONDARY_COMPONENT: f64 = 0.75;

/// A (language, region) pair identifying one translated variant of a
/// resource.
///
/// The string form is `<language>-<REGION>` (e.g. `en-US`). Components are
/// normalized on construction (language lowercase, region uppercase) so
/// equality is case-insensitive in effect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalizationKey {
    language: String,
    region: String,
}

impl LocalizationKey {
    /// Create a key from language and region codes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidLocalization`] when either component is
    /// empty after trimming.
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Result<Self, ModelError> {
        let language = language.into();
        let region = region.into();
        let lang = language.trim();
        let reg = region.trim();
        if lang.is_empty() || reg.is_empty() {
            return Err(ModelError::InvalidLocalization(format!(
                "{language}-{region}"
            )));
        }
        Ok(Self {
            language: lang.to_ascii_lowercase(),
            region: reg.to_ascii_uppercase(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Compare languages by canonical primary subtag, so `en` and `en-GB`
    /// count as the same language. Falls back to case-insensitive string
    /// comparison when a tag does not parse.
    pub fn matches_language(&self, other: &LocalizationKey) -> bool {
        languages_match(&self.language, &other.language)
    }

    /// Score this key against a requested locale under the given policy.
    ///
    /// Returns a value in `[0, 1]`: `1.0` for an exact match, a partial
    /// score for a single-component match per the policy, `0.0` otherwise.
    pub fn score(&self, requested: &LocalizationKey, behaviour: &LocaleMatchingBehaviour) -> f64 {
        if let LocaleMatchingBehaviour::Custom(scorer) = behaviour {
            return scorer(self, requested).clamp(0.0, 1.0);
        }
        let language = self.matches_language(requested);
        let region = self.region.eq_ignore_ascii_case(&requested.region);
        if language && region {
            return SCORE_EXACT;
        }
        match behaviour {
            LocaleMatchingBehaviour::RequirePerfectMatch => 0.0,
            LocaleMatchingBehaviour::PreferLanguageMatch => {
                if language {
                    SCORE_PREFERRED_COMPONENT
                } else if region {
                    SCORE_SECONDARY_COMPONENT
                } else {
                    0.0
                }
            }
            LocaleMatchingBehaviour::PreferRegionMatch => {
                if region {
                    SCORE_PREFERRED_COMPONENT
                } else if language {
                    SCORE_SECONDARY_COMPONENT
                } else {
                    0.0
                }
            }
            LocaleMatchingBehaviour::Custom(_) => unreachable!("handled above"),
        }
    }
}

impl fmt::Display for LocalizationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.language, self.region)
    }
}

impl FromStr for LocalizationKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((language, region)) = s.split_once('-') else {
            return Err(ModelError::InvalidLocalization(s.to_string()));
        };
        Self::new(language, region)
    }
}

impl serde::Serialize for LocalizationKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for LocalizationKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How candidate localizations are scored against a requested locale.
#[derive(Debug, Clone, Copy, Default)]
pub enum LocaleMatchingBehaviour {
    /// Only an exact language and region match is acceptable.
    RequirePerfectMatch,
    /// A language-only match outranks a region-only match.
    #[default]
    PreferLanguageMatch,
    /// A region-only match outranks a language-only match.
    PreferRegionMatch,
    /// Caller-supplied scoring function; results are clamped to `[0, 1]`.
    Custom(fn(&LocalizationKey, &LocalizationKey) -> f64),
}

fn languages_match(a: &str, b: &str) -> bool {
    match (
        a.parse::<LanguageIdentifier>(),
        b.parse::<LanguageIdentifier>(),
    ) {
        (Ok(left), Ok(right)) => left.language == right.language,
        _ => a.eq_ignore_ascii_case(b),
    }
}
