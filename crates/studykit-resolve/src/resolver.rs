//! Candidate scoring and best-match selection.
//!
//! Resolution is a pure function of (candidate set, requested locale,
//! matching policy, fallback): the same inputs always select the same file,
//! and nothing is cached across calls with differing policies.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use studykit_ingest::{CandidateFile, discover_localizations};
use studykit_model::{
    FileReference, LocaleMatchingBehaviour, LocalizationKey, LocalizedFileReference,
};

use crate::error::{ResolveError, Result};

/// Minimum score a candidate must exceed to resolve on the strict path.
pub const RESOLUTION_THRESHOLD: f64 = 0.5;

/// A scored candidate. Lives for a single resolution call.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub reference: LocalizedFileReference,
    pub score: f64,
}

/// A successful resolution: the chosen file location and the localized
/// reference that was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub reference: LocalizedFileReference,
}

/// Resolves logical resource references against a bundle directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    bundle_dir: PathBuf,
    behaviour: LocaleMatchingBehaviour,
    fallback: Option<LocalizationKey>,
}

impl Resolver {
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
            behaviour: LocaleMatchingBehaviour::default(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_behaviour(mut self, behaviour: LocaleMatchingBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// Localization returned (with a warning) when no candidate clears the
    /// threshold.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<LocalizationKey>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Find the best localized file for `file_ref` under the requested
    /// locale.
    pub fn resolve(
        &self,
        file_ref: &FileReference,
        requested: &LocalizationKey,
    ) -> Result<Resolution> {
        let discovered = discover_localizations(&self.bundle_dir, file_ref)?;
        let candidates = score_candidates(discovered, requested, &self.behaviour);
        select_candidate(file_ref, candidates, requested, self.fallback.as_ref())
    }
}

/// Score discovered files against the requested locale.
pub fn score_candidates(
    discovered: Vec<CandidateFile>,
    requested: &LocalizationKey,
    behaviour: &LocaleMatchingBehaviour,
) -> Vec<Candidate> {
    discovered
        .into_iter()
        .map(|file| {
            let score = file.reference.localization.score(requested, behaviour);
            debug!(candidate = %file.reference, score, "scored localization candidate");
            Candidate {
                path: file.path,
                reference: file.reference,
                score,
            }
        })
        .collect()
}

/// Select the best candidate from an already-scored set.
///
/// The top score must exceed [`RESOLUTION_THRESHOLD`]; otherwise the
/// configured fallback is used when present among the candidates, else the
/// resolution fails. A shared top score above the threshold is reported as
/// [`ResolveError::AmbiguousMatch`] rather than silently picking one.
pub fn select_candidate(
    file_ref: &FileReference,
    mut candidates: Vec<Candidate>,
    requested: &LocalizationKey,
    fallback: Option<&LocalizationKey>,
) -> Result<Resolution> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.reference.cmp(&b.reference))
    });

    if let Some(best) = candidates.first() {
        if best.score > RESOLUTION_THRESHOLD {
            let ties: Vec<LocalizedFileReference> = candidates
                .iter()
                .take_while(|candidate| candidate.score == best.score)
                .map(|candidate| candidate.reference.clone())
                .collect();
            if ties.len() > 1 {
                return Err(ResolveError::AmbiguousMatch {
                    reference: file_ref.clone(),
                    requested: requested.clone(),
                    ties,
                });
            }
            return Ok(Resolution {
                path: best.path.clone(),
                reference: best.reference.clone(),
            });
        }
    }

    if let Some(fallback) = fallback
        && let Some(candidate) = candidates
            .iter()
            .find(|candidate| &candidate.reference.localization == fallback)
    {
        warn!(
            resource = %file_ref,
            requested = %requested,
            fallback = %fallback,
            "no localization matched closely enough; using the fallback"
        );
        return Ok(Resolution {
            path: candidate.path.clone(),
            reference: candidate.reference.clone(),
        });
    }

    Err(ResolveError::NotFound {
        reference: file_ref.clone(),
        requested: requested.clone(),
    })
}
