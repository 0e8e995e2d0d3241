use super::error::ConfigurationError;
use super::fields::FieldSet;
use super::resolve::MatchScore;
use crate::catalog::{HandlerMeta, OwnerMeta};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Group key of a handler name: the leading run of characters up to, but not
/// including, the first uppercase character after position 0.
///
/// ```rust
/// use modelselect::selector::group_key;
///
/// assert_eq!(group_key("postOrder"), "post");
/// assert_eq!(group_key("postInvoice"), "post");
/// assert_eq!(group_key("delete"), "delete");
/// assert_eq!(group_key("Put"), "Put");
/// ```
#[must_use]
pub fn group_key(name: &str) -> &str {
    let mut chars = name.char_indices();
    chars.next();
    match chars.find(|(_, c)| c.is_uppercase()) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Decides which handlers are plain reads and never take part in selection.
pub trait ReadClassifier {
    fn is_read(&self, handler: &HandlerMeta) -> bool;
}

impl<F> ReadClassifier for F
where
    F: Fn(&HandlerMeta) -> bool,
{
    fn is_read(&self, handler: &HandlerMeta) -> bool {
        self(handler)
    }
}

/// Read classification by name prefix (case-insensitive) or explicit marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalReads {
    prefixes: Vec<String>,
}

impl ConventionalReads {
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for ConventionalReads {
    fn default() -> Self {
        Self::new(["get"])
    }
}

impl ReadClassifier for ConventionalReads {
    fn is_read(&self, handler: &HandlerMeta) -> bool {
        if handler.read {
            return true;
        }
        let name = handler.name.to_lowercase();
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

/// Lower-cased payload field names a handler expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerShape {
    fields: BTreeSet<String>,
}

impl HandlerShape {
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: fields.into_iter().map(|f| f.as_ref().to_lowercase()).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Score against live payload fields: |shape ∩ live| over |live|.
    #[must_use]
    pub fn score(&self, live: &FieldSet) -> MatchScore {
        let matched = live.iter().filter(|f| self.fields.contains(*f)).count();
        MatchScore::new(matched, live.len())
    }
}

/// One ambiguous handler with its verb and payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
    pub handler: Arc<str>,
    /// Uppercased group key, e.g. `POST`.
    pub verb: Arc<str>,
    pub shape: HandlerShape,
}

/// Owner name to the signatures of its ambiguous handlers.
///
/// Immutable once built. Owners without any ambiguous group have no entry.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    owners: BTreeMap<String, Vec<HandlerSignature>>,
}

impl OwnerIndex {
    #[must_use]
    pub fn get(&self, owner: &str) -> Option<&[HandlerSignature]> {
        self.owners.get(owner).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_owner(&self, owner: &str) -> bool {
        self.owners.contains_key(owner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Owners in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HandlerSignature])> {
        self.owners.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Builds the [`OwnerIndex`] from handler metadata.
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder<C = ConventionalReads> {
    classifier: C,
}

impl SignatureBuilder<ConventionalReads> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ReadClassifier> SignatureBuilder<C> {
    #[must_use]
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Build the index for `owners`.
    ///
    /// Fails on the first handler that is part of an ambiguous group but does
    /// not declare exactly one structured body parameter.
    pub fn build(&self, owners: &[OwnerMeta]) -> Result<OwnerIndex, ConfigurationError> {
        let mut index = OwnerIndex::default();

        for owner in owners {
            if index.owners.contains_key(&owner.name) {
                return Err(ConfigurationError::DuplicateOwner {
                    owner: owner.name.clone(),
                });
            }
            let signatures = self.owner_signatures(owner)?;
            if signatures.is_empty() {
                continue;
            }
            debug!(
                owner = %owner.name,
                signatures = signatures.len(),
                "Owner has ambiguous handlers"
            );
            index.owners.insert(owner.name.clone(), signatures);
        }

        info!(
            owners_scanned = owners.len(),
            owners_indexed = index.len(),
            signatures = index.owners.values().map(Vec::len).sum::<usize>(),
            "Action selector index built"
        );
        Ok(index)
    }

    fn owner_signatures(
        &self,
        owner: &OwnerMeta,
    ) -> Result<Vec<HandlerSignature>, ConfigurationError> {
        let mut groups: HashMap<&str, Vec<&HandlerMeta>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for handler in &owner.handlers {
            if handler.inherited || self.classifier.is_read(handler) {
                continue;
            }
            if handler.name.is_empty() {
                return Err(ConfigurationError::EmptyHandlerName {
                    owner: owner.name.clone(),
                });
            }
            let key = group_key(&handler.name);
            let group = groups.entry(key).or_default();
            if group.is_empty() {
                order.push(key);
            }
            group.push(handler);
        }

        let mut signatures = Vec::new();
        for key in order {
            let Some(group) = groups.get(key) else {
                continue;
            };
            if group.len() < 2 {
                continue;
            }
            let verb: Arc<str> = Arc::from(key.to_uppercase());
            for handler in group {
                signatures.push(HandlerSignature {
                    handler: Arc::from(handler.name.as_str()),
                    verb: Arc::clone(&verb),
                    shape: handler_shape(owner, handler)?,
                });
            }
        }
        Ok(signatures)
    }
}

fn handler_shape(owner: &OwnerMeta, handler: &HandlerMeta) -> Result<HandlerShape, ConfigurationError> {
    let mut models = handler.parameters.iter().filter(|p| p.is_payload_model());
    match (models.next(), models.next()) {
        (Some(model), None) => Ok(HandlerShape::new(
            model
                .fields
                .iter()
                .filter(|f| !f.client_ignored)
                .map(|f| f.name.as_str()),
        )),
        _ => Err(ConfigurationError::ComplexParameterCount {
            owner: owner.name.clone(),
            handler: handler.name.clone(),
            count: handler
                .parameters
                .iter()
                .filter(|p| p.is_payload_model())
                .count(),
        }),
    }
}
