use http::StatusCode;
use std::fmt;
use std::sync::Arc;

/// Setup error raised while building the owner index.
///
/// Fatal: a selector that failed to build must never serve requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An ambiguous handler does not have exactly one structured body parameter.
    ComplexParameterCount {
        owner: String,
        handler: String,
        /// Number of qualifying parameters found (0 or 2+).
        count: usize,
    },
    /// The same owner appears twice in the catalogue.
    DuplicateOwner { owner: String },
    /// A handler has an empty name, so no group key can be derived.
    EmptyHandlerName { owner: String },
    /// No catalogue location was configured.
    MissingCatalog { variable: &'static str },
    /// The catalogue could not be read or parsed.
    Catalog { message: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::ComplexParameterCount {
                owner,
                handler,
                count,
            } => write!(
                f,
                "Action selector configuration error: {}::{} declares {} complex body parameters. \
                Handlers sharing a verb prefix must declare exactly one.",
                owner, handler, count
            ),
            ConfigurationError::DuplicateOwner { owner } => {
                write!(
                    f,
                    "Action selector configuration error: owner '{}' is declared more than once",
                    owner
                )
            }
            ConfigurationError::EmptyHandlerName { owner } => {
                write!(
                    f,
                    "Action selector configuration error: owner '{}' declares a handler with an empty name",
                    owner
                )
            }
            ConfigurationError::MissingCatalog { variable } => {
                write!(
                    f,
                    "Action selector configuration error: you must set {} to the handler catalog path",
                    variable
                )
            }
            ConfigurationError::Catalog { message } => {
                write!(f, "Action selector configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Per-request selection failure, surfaced to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No candidate can be satisfied by the payload fields.
    NoMatchingAction { owner: String, verb: String },
    /// Two or more candidates tie for the best score.
    AmbiguousMatch {
        owner: String,
        verb: String,
        candidates: Vec<Arc<str>>,
    },
}

impl SelectionError {
    /// Status code the host should answer with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            SelectionError::NoMatchingAction { .. } => StatusCode::BAD_REQUEST,
            SelectionError::AmbiguousMatch { .. } => StatusCode::MULTIPLE_CHOICES,
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoMatchingAction { owner, verb } => {
                write!(
                    f,
                    "Can't find a valid {} action on {} for the given arguments",
                    verb, owner
                )
            }
            SelectionError::AmbiguousMatch {
                owner,
                verb,
                candidates,
            } => {
                write!(
                    f,
                    "Multiple {} actions on {} match the given arguments: {}",
                    verb,
                    owner,
                    candidates.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for SelectionError {}
