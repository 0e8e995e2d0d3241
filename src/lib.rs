//! # modelselect
//!
//! **modelselect** picks, at request time, which of several handlers sharing
//! an HTTP verb prefix should serve a request, by matching the request
//! payload's field names against the request model each handler declares.
//!
//! ## Overview
//!
//! A controller often exposes several actions for the same verb, for
//! example `postOrder(Order)` and `postInvoice(Invoice)` on one resource.
//! The conventional router cannot tell them apart from the URL alone.
//! modelselect precomputes, per owner, the payload shape of every such
//! handler and, per request, scores each candidate by the share of payload
//! fields its shape covers.
//!
//! ## Architecture
//!
//! - **[`catalog`]** - Handler metadata, the [`Shape`](catalog::Shape) trait
//!   and catalogue loading from YAML/JSON
//! - **[`selector`]** - Signature building and action resolution
//! - **[`dispatcher`]** - Host adapter mapping outcomes to handler calls and
//!   HTTP responses
//! - **[`runtime_config`]** - Environment variable configuration
//! - **[`logging`]** - Structured logging setup
//! - **[`cli`]** - `modelselect` command-line tools
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host Router
//!     participant Dispatcher
//!     participant Selector as ActionSelector
//!     participant Handler
//!
//!     Host->>Dispatcher: ActionRequest(owner, POST, body)
//!     Dispatcher->>Dispatcher: FieldSet::from_json(body)
//!     Dispatcher->>Selector: resolve(owner, "POST", fields)
//!     alt NotApplicable
//!         Selector-->>Dispatcher: conventional handler
//!     else Winner
//!         Selector-->>Dispatcher: selected handler
//!     else NoMatchingAction
//!         Selector-->>Host: 400 Bad Request
//!     else AmbiguousMatch
//!         Selector-->>Host: 300 Multiple Choices
//!     end
//!     Dispatcher->>Handler: invoke
//!     Handler-->>Host: HandlerResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use modelselect::catalog::{HandlerMeta, OwnerMeta};
//! use modelselect::selector::{ActionSelector, FieldSet, Resolution, SignatureBuilder};
//! use modelselect::Shape;
//!
//! #[derive(Shape)]
//! struct Order { id: u64, total: u64 }
//!
//! #[derive(Shape)]
//! struct Invoice {
//!     id: u64,
//!     amount: u64,
//!     #[shape(rename = "dueDate")]
//!     due_date: String,
//! }
//!
//! let owner = OwnerMeta::new("Billing")
//!     .handler(HandlerMeta::new("postOrder").body::<Order>())
//!     .handler(HandlerMeta::new("postInvoice").body::<Invoice>());
//!
//! let selector = ActionSelector::new(SignatureBuilder::new().build(&[owner]).unwrap());
//! let fields = FieldSet::from_keys(["id", "amount", "dueDate"]);
//!
//! let Ok(Resolution::Winner(sig)) = selector.resolve("Billing", "POST", &fields) else {
//!     panic!("expected a winner");
//! };
//! assert_eq!(&*sig.handler, "postInvoice");
//! ```

// `#[derive(Shape)]` expands to `::modelselect::...` paths.
extern crate self as modelselect;

pub mod catalog;
pub mod cli;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod runtime_config;
pub mod selector;

pub use catalog::{load_catalog, Catalog, Shape};
pub use modelselect_macros::Shape;
pub use selector::{ActionSelector, ConfigurationError, FieldSet, Resolution, SelectionError};
