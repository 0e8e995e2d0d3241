//! Resolver core - per-request hot path.
//!
//! Resolution only reads the immutable [`OwnerIndex`], so one
//! [`ActionSelector`] can be shared across threads behind an `Arc` without
//! locking.

use super::build::{HandlerSignature, OwnerIndex, ReadClassifier, SignatureBuilder};
use super::error::{ConfigurationError, SelectionError};
use super::fields::FieldSet;
use crate::catalog::{load_catalog, Catalog};
use crate::runtime_config::RuntimeConfig;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Candidates per verb before heap allocation. Ambiguous groups are small.
pub const MAX_INLINE_CANDIDATES: usize = 8;

/// Fraction of live payload fields that a candidate's shape covers.
///
/// Compared exactly by cross-multiplication, never through floats.
#[derive(Debug, Clone, Copy)]
pub struct MatchScore {
    pub matched: usize,
    pub total: usize,
}

impl MatchScore {
    #[must_use]
    pub fn new(matched: usize, total: usize) -> Self {
        Self { matched, total }
    }

    /// Ratio for diagnostics. Zero when `total` is zero.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.matched * other.total).cmp(&(other.matched * self.total))
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MatchScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MatchScore {}

/// Successful outcome of [`ActionSelector::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The single best-matching handler.
    Winner(&'a HandlerSignature),
    /// No ambiguity is registered for this owner and verb; the conventional
    /// dispatcher should pick the handler.
    NotApplicable,
}

/// Picks one handler among siblings sharing a verb prefix, by payload shape.
#[derive(Debug, Clone, Default)]
pub struct ActionSelector {
    index: OwnerIndex,
}

impl ActionSelector {
    #[must_use]
    pub fn new(index: OwnerIndex) -> Self {
        Self { index }
    }

    /// Build with the conventional read classifier.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ConfigurationError> {
        Ok(Self::new(SignatureBuilder::new().build(&catalog.owners)?))
    }

    pub fn from_catalog_with<C: ReadClassifier>(
        catalog: &Catalog,
        builder: &SignatureBuilder<C>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::new(builder.build(&catalog.owners)?))
    }

    /// Load the configured catalogue and build the index, failing fast.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, ConfigurationError> {
        let path = config
            .catalog
            .as_ref()
            .ok_or(ConfigurationError::MissingCatalog {
                variable: crate::runtime_config::CATALOG_ENV,
            })?;
        let catalog = load_catalog(path).map_err(|e| ConfigurationError::Catalog {
            message: format!("{e:#}"),
        })?;
        let builder = SignatureBuilder::with_classifier(config.read_classifier());
        Self::from_catalog_with(&catalog, &builder)
    }

    #[must_use]
    pub fn index(&self) -> &OwnerIndex {
        &self.index
    }

    /// Resolve the handler for `owner` and `verb` given the live payload fields.
    ///
    /// Candidates whose shape needs more fields than the payload carries are
    /// discarded. The remaining candidate with the highest [`MatchScore`] wins;
    /// a tie at the top is reported as [`SelectionError::AmbiguousMatch`].
    pub fn resolve(
        &self,
        owner: &str,
        verb: &str,
        fields: &FieldSet,
    ) -> Result<Resolution<'_>, SelectionError> {
        let Some(signatures) = self.index.get(owner) else {
            return Ok(Resolution::NotApplicable);
        };
        let mut targets = signatures
            .iter()
            .filter(|s| s.verb.eq_ignore_ascii_case(verb))
            .peekable();
        if targets.peek().is_none() {
            return Ok(Resolution::NotApplicable);
        }

        // An empty payload leaves the ratio undefined.
        if fields.is_empty() {
            warn!(owner, verb, "Empty payload for ambiguous action");
            return Err(no_matching_action(owner, verb));
        }

        let candidates: SmallVec<[(&HandlerSignature, MatchScore); MAX_INLINE_CANDIDATES]> =
            targets
                .filter(|s| s.shape.len() <= fields.len())
                .map(|s| (s, s.shape.score(fields)))
                .collect();

        let Some(best) = candidates.iter().map(|(_, score)| *score).max() else {
            warn!(
                owner,
                verb,
                fields = fields.len(),
                "No action shape fits the payload"
            );
            return Err(no_matching_action(owner, verb));
        };

        let winners: SmallVec<[&HandlerSignature; MAX_INLINE_CANDIDATES]> = candidates
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(sig, _)| *sig)
            .collect();

        match winners.as_slice() {
            [winner] => {
                debug!(
                    owner,
                    verb,
                    handler = %winner.handler,
                    score = best.ratio(),
                    candidates = candidates.len(),
                    "Action selected by payload shape"
                );
                Ok(Resolution::Winner(*winner))
            }
            tied => {
                warn!(
                    owner,
                    verb,
                    score = best.ratio(),
                    tied = tied.len(),
                    "Ambiguous action match"
                );
                Err(SelectionError::AmbiguousMatch {
                    owner: owner.to_string(),
                    verb: verb.to_string(),
                    candidates: tied.iter().map(|s| Arc::clone(&s.handler)).collect(),
                })
            }
        }
    }
}

fn no_matching_action(owner: &str, verb: &str) -> SelectionError {
    SelectionError::NoMatchingAction {
        owner: owner.to_string(),
        verb: verb.to_string(),
    }
}
