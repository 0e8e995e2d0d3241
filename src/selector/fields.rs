use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Lower-cased top-level field names of an inbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeSet<String>,
}

impl FieldSet {
    #[must_use]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: keys.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    /// Keys of a JSON object. Any other value yields an empty set.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_keys(map.keys()),
            _ => Self::default(),
        }
    }

    /// Keys of a raw JSON body. Empty, invalid or non-object bodies yield an
    /// empty set.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(e) => {
                debug!(error = %e, body_len = body.len(), "Request body is not JSON");
                Self::default()
            }
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

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}
