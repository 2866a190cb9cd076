mod error;
mod resolver;

pub use error::{ResolveError, Result};
pub use resolver::{
    Candidate, RESOLUTION_THRESHOLD, Resolution, Resolver, score_candidates, select_candidate,
};
