use crate::logging::init_logging;
use crate::runtime_config::{RuntimeConfig, CATALOG_ENV, READ_PREFIXES_ENV};
use crate::selector::{ActionSelector, FieldSet, OwnerIndex, Resolution, SelectionError};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

/// Command-line interface for the action selector
#[derive(Parser)]
#[command(name = "modelselect")]
#[command(about = "Payload-shape action selection tools", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "MSEL_LOG_LEVEL")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the owner index and print it as JSON
    Inspect {
        /// Handler catalogue (YAML or JSON)
        #[arg(short, long, env = CATALOG_ENV)]
        catalog: PathBuf,

        /// Comma-separated read-action name prefixes
        #[arg(long, env = READ_PREFIXES_ENV)]
        read_prefixes: Option<String>,
    },
    /// Resolve one request and print the outcome as JSON
    Resolve {
        /// Handler catalogue (YAML or JSON)
        #[arg(short, long, env = CATALOG_ENV)]
        catalog: PathBuf,

        /// Comma-separated read-action name prefixes
        #[arg(long, env = READ_PREFIXES_ENV)]
        read_prefixes: Option<String>,

        /// Owner (controller) name
        #[arg(short, long)]
        owner: String,

        /// HTTP verb, e.g. POST
        #[arg(short, long)]
        verb: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Inspect {
            catalog,
            read_prefixes,
        } => {
            let selector = build_selector(catalog, read_prefixes)?;
            println!("{}", serde_json::to_string_pretty(&index_report(selector.index()))?);
        }
        Commands::Resolve {
            catalog,
            read_prefixes,
            owner,
            verb,
            body,
        } => {
            let selector = build_selector(catalog, read_prefixes)?;
            let fields = body
                .as_deref()
                .map(|b| FieldSet::from_body(b.as_bytes()))
                .unwrap_or_default();
            let verb = verb.to_uppercase();
            let report = resolution_report(&selector.resolve(&owner, &verb, &fields));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Bootstrap through the same fail-fast path as a host: environment first,
/// command-line flags on top.
pub fn build_selector(catalog: PathBuf, read_prefixes: Option<String>) -> anyhow::Result<ActionSelector> {
    let config = RuntimeConfig::from_env()
        .with_catalog(catalog.clone())
        .with_read_prefixes(read_prefixes.as_deref());
    ActionSelector::from_config(&config)
        .with_context(|| format!("failed to build action index from {}", catalog.display()))
}

/// JSON view of an owner index.
#[must_use]
pub fn index_report(index: &OwnerIndex) -> Value {
    let owners: serde_json::Map<String, Value> = index
        .iter()
        .map(|(owner, signatures)| {
            let handlers: Vec<Value> = signatures
                .iter()
                .map(|s| {
                    json!({
                        "handler": &*s.handler,
                        "verb": &*s.verb,
                        "shape": s.shape.fields().collect::<Vec<_>>(),
                    })
                })
                .collect();
            (owner.to_string(), Value::Array(handlers))
        })
        .collect();
    json!({ "owners": owners })
}

/// JSON view of a resolution outcome.
#[must_use]
pub fn resolution_report(outcome: &Result<Resolution<'_>, SelectionError>) -> Value {
    match outcome {
        Ok(Resolution::Winner(sig)) => json!({
            "outcome": "winner",
            "handler": &*sig.handler,
            "verb": &*sig.verb,
        }),
        Ok(Resolution::NotApplicable) => json!({ "outcome": "not_applicable" }),
        Err(e) => {
            let mut report = json!({
                "status": e.status().as_u16(),
                "message": e.to_string(),
            });
            match e {
                SelectionError::NoMatchingAction { .. } => {
                    report["outcome"] = json!("no_matching_action");
                }
                SelectionError::AmbiguousMatch { candidates, .. } => {
                    let candidates: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();
                    report["outcome"] = json!("ambiguous_match");
                    report["candidates"] = json!(candidates);
                }
            }
            report
        }
    }
}
