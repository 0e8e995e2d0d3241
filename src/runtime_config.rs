//! # Runtime Configuration Module
//!
//! Environment variable configuration for the action selector.
//!
//! ## Environment Variables
//!
//! ### `MSEL_CATALOG`
//!
//! Path to the handler catalogue (YAML or JSON). Required by
//! [`ActionSelector::from_config`](crate::selector::ActionSelector::from_config);
//! startup fails when it is missing.
//!
//! ### `MSEL_READ_PREFIXES`
//!
//! Comma-separated, case-insensitive handler name prefixes that mark plain
//! read actions. Those handlers never take part in selection.
//!
//! Default: `get`
//!
//! ## Example Configuration
//!
//! ```bash
//! export MSEL_CATALOG=config/handlers.yaml
//! export MSEL_READ_PREFIXES=get,find,list
//! ```

use crate::selector::ConventionalReads;
use std::env;
use std::path::PathBuf;

pub const CATALOG_ENV: &str = "MSEL_CATALOG";
pub const READ_PREFIXES_ENV: &str = "MSEL_READ_PREFIXES";

const DEFAULT_READ_PREFIXES: &str = "get";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Handler catalogue location
    pub catalog: Option<PathBuf>,
    /// Lower-cased read prefixes
    pub read_prefixes: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            read_prefixes: parse_prefixes(DEFAULT_READ_PREFIXES),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(CATALOG_ENV).ok(), env::var(READ_PREFIXES_ENV).ok())
    }

    /// Build from raw variable values. Blank values count as unset.
    pub fn from_vars(catalog: Option<String>, read_prefixes: Option<String>) -> Self {
        let catalog = catalog
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .map(PathBuf::from);
        let read_prefixes = read_prefixes
            .map(|p| parse_prefixes(&p))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| parse_prefixes(DEFAULT_READ_PREFIXES));
        RuntimeConfig {
            catalog,
            read_prefixes,
        }
    }

    /// Override the catalogue location, e.g. from a command-line flag.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<PathBuf>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Override the read prefixes when `raw` lists at least one.
    #[must_use]
    pub fn with_read_prefixes(mut self, raw: Option<&str>) -> Self {
        let prefixes = raw.map(parse_prefixes).unwrap_or_default();
        if !prefixes.is_empty() {
            self.read_prefixes = prefixes;
        }
        self
    }

    #[must_use]
    pub fn read_classifier(&self) -> ConventionalReads {
        ConventionalReads::new(&self.read_prefixes)
    }
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}
