//! # Selector Module
//!
//! Chooses between handlers of one owner that share a verb prefix
//! (`postOrder`, `postInvoice`, ...) by comparing the request payload's field
//! names with the fields each handler's request model declares.
//!
//! ## Overview
//!
//! Selection happens in two phases:
//!
//! 1. **Build**: at startup, [`SignatureBuilder`] groups each owner's
//!    non-read handlers by [`group_key`], drops groups with a single handler
//!    and records the payload shape of every remaining handler in an
//!    [`OwnerIndex`]. A handler in an ambiguous group that does not declare
//!    exactly one structured body parameter aborts the build with a
//!    [`ConfigurationError`].
//!
//! 2. **Resolve**: per request, [`ActionSelector::resolve`] scores the
//!    owner's candidates for the request verb against the payload's
//!    [`FieldSet`] and returns the winner, [`Resolution::NotApplicable`] when
//!    no ambiguity exists, or a [`SelectionError`].
//!
//! ## Example
//!
//! ```rust
//! use modelselect::catalog::{FieldMeta, HandlerMeta, OwnerMeta};
//! use modelselect::selector::{ActionSelector, FieldSet, Resolution, SignatureBuilder};
//!
//! let orders = OwnerMeta::new("Orders")
//!     .handler(HandlerMeta::new("postOrder").body_fields(
//!         "order",
//!         vec![FieldMeta::new("id"), FieldMeta::new("total")],
//!     ))
//!     .handler(HandlerMeta::new("postInvoice").body_fields(
//!         "invoice",
//!         vec![FieldMeta::new("id"), FieldMeta::new("amount"), FieldMeta::new("dueDate")],
//!     ));
//!
//! let index = SignatureBuilder::new().build(&[orders]).unwrap();
//! let selector = ActionSelector::new(index);
//!
//! let fields = FieldSet::from_keys(["id", "amount", "dueDate"]);
//! match selector.resolve("Orders", "POST", &fields).unwrap() {
//!     Resolution::Winner(sig) => assert_eq!(&*sig.handler, "postInvoice"),
//!     Resolution::NotApplicable => unreachable!(),
//! }
//! ```

mod build;
mod error;
mod fields;
mod resolve;
#[cfg(test)]
mod tests;

pub use build::{
    group_key, ConventionalReads, HandlerShape, HandlerSignature, OwnerIndex, ReadClassifier,
    SignatureBuilder,
};
pub use error::{ConfigurationError, SelectionError};
pub use fields::FieldSet;
pub use resolve::{ActionSelector, MatchScore, Resolution, MAX_INLINE_CANDIDATES};
