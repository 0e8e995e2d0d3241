//! # Catalog Module
//!
//! Handler metadata consumed by the signature builder. A catalogue lists
//! handler owners (controllers), their actions, each action's parameters and,
//! for structured parameters, the fields the client is expected to send.
//!
//! Catalogues are either declared in code, using [`Shape`] (usually derived
//! with `#[derive(Shape)]`) to describe request models, or loaded from a YAML
//! or JSON file with [`load_catalog`].
//!
//! ```rust
//! use modelselect::catalog::{FieldMeta, HandlerMeta, OwnerMeta};
//!
//! let orders = OwnerMeta::new("Orders")
//!     .handler(HandlerMeta::new("postOrder").body_fields(
//!         "order",
//!         vec![FieldMeta::new("id"), FieldMeta::new("total")],
//!     ))
//!     .handler(HandlerMeta::new("getOrder").scalar("id"));
//! assert_eq!(orders.handlers.len(), 2);
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
