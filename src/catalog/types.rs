use serde::{Deserialize, Serialize};

/// Describes the payload fields of a request model.
///
/// Implemented by request models that actions accept as their body
/// parameter. Normally derived:
///
/// ```rust
/// use modelselect::Shape;
///
/// #[derive(Shape)]
/// struct Invoice {
///     id: u64,
///     amount: u64,
///     #[shape(rename = "dueDate")]
///     due_date: String,
///     #[shape(ignore)]
///     audit_trail: Vec<String>,
/// }
///
/// let fields = Invoice::shape_fields();
/// assert_eq!(fields.len(), 4);
/// assert!(fields[3].client_ignored);
/// ```
pub trait Shape {
    fn shape_fields() -> Vec<FieldMeta>;
}

/// One property of a structured parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    /// Never sent by clients, so never useful for telling handlers apart.
    #[serde(default)]
    pub client_ignored: bool,
}

impl FieldMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client_ignored: false,
        }
    }

    #[must_use]
    pub fn client_ignored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client_ignored: true,
        }
    }
}

/// Where a parameter is bound from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    #[default]
    Body,
    /// Bound from the URI path or query string.
    Uri,
}

impl std::fmt::Display for ParameterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterSource::Body => write!(f, "Body"),
            ParameterSource::Uri => write!(f, "Uri"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMeta {
    pub name: String,
    /// Object type rather than a scalar (string, number, id...).
    #[serde(default)]
    pub structured: bool,
    #[serde(default)]
    pub source: ParameterSource,
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
}

impl ParameterMeta {
    /// A structured parameter bound from the request body.
    #[must_use]
    pub fn body(name: impl Into<String>, fields: Vec<FieldMeta>) -> Self {
        Self {
            name: name.into(),
            structured: true,
            source: ParameterSource::Body,
            fields,
        }
    }

    /// A structured parameter bound from the URI.
    #[must_use]
    pub fn uri(name: impl Into<String>, fields: Vec<FieldMeta>) -> Self {
        Self {
            name: name.into(),
            structured: true,
            source: ParameterSource::Uri,
            fields,
        }
    }

    /// A simple value. It never carries a payload shape, wherever it binds from.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structured: false,
            source: ParameterSource::Body,
            fields: Vec::new(),
        }
    }

    /// True when this parameter carries the payload shape of its handler.
    #[inline]
    #[must_use]
    pub fn is_payload_model(&self) -> bool {
        self.structured && self.source == ParameterSource::Body
    }
}

/// A public action declared on an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerMeta {
    pub name: String,
    /// Explicit read marker, equivalent to a read-verb name prefix.
    #[serde(default)]
    pub read: bool,
    /// Declared on a base type rather than on the owner itself.
    #[serde(default)]
    pub inherited: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterMeta>,
}

impl HandlerMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read: false,
            inherited: false,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn read(mut self) -> Self {
        self.read = true;
        self
    }

    #[must_use]
    pub fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    #[must_use]
    pub fn parameter(mut self, param: ParameterMeta) -> Self {
        self.parameters.push(param);
        self
    }

    /// Adds a body parameter described by `T`.
    #[must_use]
    pub fn body<T: Shape>(self) -> Self {
        let name = short_type_name::<T>();
        self.parameter(ParameterMeta::body(name, T::shape_fields()))
    }

    /// Adds a URI-bound structured parameter described by `T`.
    #[must_use]
    pub fn uri<T: Shape>(self) -> Self {
        let name = short_type_name::<T>();
        self.parameter(ParameterMeta::uri(name, T::shape_fields()))
    }

    #[must_use]
    pub fn body_fields(self, name: impl Into<String>, fields: Vec<FieldMeta>) -> Self {
        self.parameter(ParameterMeta::body(name, fields))
    }

    #[must_use]
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.parameter(ParameterMeta::scalar(name))
    }
}

/// A handler owner (controller) and the actions declared on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerMeta {
    pub name: String,
    #[serde(default)]
    pub handlers: Vec<HandlerMeta>,
}

impl OwnerMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn handler(mut self, handler: HandlerMeta) -> Self {
        self.handlers.push(handler);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub owners: Vec<OwnerMeta>,
}

impl Catalog {
    #[must_use]
    pub fn new(owners: Vec<OwnerMeta>) -> Self {
        Self { owners }
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
