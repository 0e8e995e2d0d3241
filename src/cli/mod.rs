//! # CLI Module
//!
//! Command-line tools for inspecting a handler catalogue and trying out
//! action selection without a running host.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! Build the owner index and print it as JSON:
//!
//! ```bash
//! modelselect inspect --catalog handlers.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve one request against the index:
//!
//! ```bash
//! modelselect resolve --catalog handlers.yaml --owner Orders --verb POST \
//!     --body '{"id": 1, "amount": 10, "dueDate": "2024-01-01"}'
//! ```
//!
//! Both commands accept `--read-prefixes` (or `MSEL_READ_PREFIXES`) and read
//! the catalogue path from `MSEL_CATALOG` when `--catalog` is omitted. A
//! catalogue that fails to build exits with a non-zero status.

mod commands;

pub use commands::{build_selector, index_report, resolution_report, run_cli, Cli, Commands};
