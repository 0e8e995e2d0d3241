//! # Dispatcher Module
//!
//! Host-side adapter that turns selector outcomes into handler calls and
//! HTTP responses.
//!
//! ## Request Flow
//!
//! 1. The conventional router picks an owner and a default handler name
//! 2. The dispatcher extracts the payload [`FieldSet`](crate::selector::FieldSet)
//!    and asks the [`ActionSelector`](crate::selector::ActionSelector) to resolve
//! 3. The outcome is mapped:
//!    - not applicable: the conventional handler runs
//!    - winner: the selected handler runs
//!    - no matching action: `400 Bad Request`
//!    - ambiguous match: `300 Multiple Choices` listing the tied handlers
//!
//! ## Error Handling
//!
//! - Unregistered handlers return 404 responses
//! - Handler panics are caught and return 500 responses
//!
//! Every response carries the request's `x-request-id`.

mod core;

pub use self::core::{
    ActionRequest, Dispatcher, HandlerFn, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS, REQUEST_ID_HEADER,
};
