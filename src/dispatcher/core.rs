use crate::ids::RequestId;
use crate::selector::{ActionSelector, FieldSet, Resolution, SelectionError};
use http::Method;
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Response header echoing the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Stack-allocated header storage
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// A request routed to an owner, before action selection.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    /// Correlates the dispatch log events of one request
    pub request_id: RequestId,
    /// Owner (controller) the router matched
    pub owner: String,
    pub method: Method,
    /// Handler the conventional router would call
    pub handler_name: String,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl ActionRequest {
    #[must_use]
    pub fn new(owner: impl Into<String>, method: Method, handler_name: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            owner: owner.into(),
            method,
            handler_name: handler_name.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a raw body. Bodies that are not valid JSON are dropped.
    #[must_use]
    pub fn with_raw_body(mut self, body: &[u8]) -> Self {
        self.body = serde_json::from_slice(body).ok();
        self
    }

    /// Top-level payload field names.
    #[must_use]
    pub fn field_set(&self) -> FieldSet {
        self.body.as_ref().map(FieldSet::from_json).unwrap_or_default()
    }
}

/// Response data returned by a handler
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: HeaderVec,
    pub body: Value,
}

impl HandlerResponse {
    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    /// Response for a failed selection: 400 for no match, 300 for a tie.
    #[must_use]
    pub fn from_selection_error(err: &SelectionError) -> Self {
        let status = err.status().as_u16();
        match err {
            SelectionError::NoMatchingAction { .. } => Self::error(status, &err.to_string()),
            SelectionError::AmbiguousMatch { candidates, .. } => {
                let candidates: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();
                Self::json(
                    status,
                    json!({ "error": err.to_string(), "candidates": candidates }),
                )
            }
        }
    }

    /// Get a header by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// A registered handler body.
pub type HandlerFn = Arc<dyn Fn(ActionRequest) -> HandlerResponse + Send + Sync>;

/// Routes requests to registered handlers, consulting the [`ActionSelector`]
/// whenever the owner has handlers sharing the request verb.
#[derive(Clone)]
pub struct Dispatcher {
    selector: Arc<ActionSelector>,
    /// owner -> handler name -> handler
    handlers: HashMap<String, HashMap<String, HandlerFn>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(selector: Arc<ActionSelector>) -> Self {
        Dispatcher {
            selector,
            handlers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &ActionSelector {
        &self.selector
    }

    /// Register a handler. A handler already registered under the same owner
    /// and name is replaced.
    pub fn register_handler<F>(&mut self, owner: &str, name: &str, handler_fn: F)
    where
        F: Fn(ActionRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        let owner_handlers = self.handlers.entry(owner.to_string()).or_default();
        if owner_handlers
            .insert(name.to_string(), Arc::new(handler_fn))
            .is_some()
        {
            warn!(owner, handler_name = name, "Replaced existing handler");
        } else {
            info!(
                owner,
                handler_name = name,
                total_handlers = owner_handlers.len(),
                "Handler registered successfully"
            );
        }
    }

    /// Select and invoke the handler for `req`. The response carries the
    /// request id in [`REQUEST_ID_HEADER`].
    pub fn dispatch(&self, req: ActionRequest) -> HandlerResponse {
        let request_id = req.request_id;
        let mut response = self.select_and_invoke(req);
        response.set_header(REQUEST_ID_HEADER, request_id.to_string());
        response
    }

    fn select_and_invoke(&self, mut req: ActionRequest) -> HandlerResponse {
        let fields = req.field_set();
        match self
            .selector
            .resolve(&req.owner, req.method.as_str(), &fields)
        {
            Ok(Resolution::Winner(sig)) => {
                debug!(
                    request_id = %req.request_id,
                    owner = %req.owner,
                    conventional = %req.handler_name,
                    selected = %sig.handler,
                    "Handler selected by payload shape"
                );
                req.handler_name = sig.handler.to_string();
            }
            Ok(Resolution::NotApplicable) => {}
            Err(e) => {
                warn!(
                    request_id = %req.request_id,
                    owner = %req.owner,
                    method = %req.method,
                    error = %e,
                    "Action selection failed"
                );
                return HandlerResponse::from_selection_error(&e);
            }
        }
        self.invoke(req)
    }

    fn invoke(&self, req: ActionRequest) -> HandlerResponse {
        let Some(handler_fn) = self
            .handlers
            .get(&req.owner)
            .and_then(|h| h.get(&req.handler_name))
        else {
            warn!(
                request_id = %req.request_id,
                owner = %req.owner,
                handler_name = %req.handler_name,
                "Handler not registered"
            );
            return HandlerResponse::error(404, "Handler not found");
        };

        let request_id = req.request_id;
        let owner = req.owner.clone();
        let handler_name = req.handler_name.clone();
        let execution_start = Instant::now();

        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler_fn(req))) {
            Ok(response) => {
                debug!(
                    request_id = %request_id,
                    owner = %owner,
                    handler_name = %handler_name,
                    status = response.status,
                    execution_time_us = execution_start.elapsed().as_micros() as u64,
                    "Handler execution complete"
                );
                response
            }
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    request_id = %request_id,
                    owner = %owner,
                    handler_name = %handler_name,
                    panic_message = %panic_message,
                    "Handler panicked - CRITICAL"
                );
                HandlerResponse::error(500, &format!("Handler panicked: {panic_message}"))
            }
        }
    }
}
