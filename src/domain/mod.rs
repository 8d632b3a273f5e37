//! Domain types shared by tools, the dispatcher and the transports.

pub mod models;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::error::InvocationError;

pub type JsonObject = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    String,
    Float,
}

impl ArgType {
    /// JSON Schema type name.
    pub fn schema_type(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Float => "number",
        }
    }
}

/// Default carried by an optional field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgDefault {
    Text(&'static str),
    Float(f64),
}

impl ArgDefault {
    fn to_value(self) -> ArgValue {
        match self {
            ArgDefault::Text(s) => ArgValue::Text(s.to_owned()),
            ArgDefault::Float(f) => ArgValue::Float(f),
        }
    }

    fn to_json(self) -> Value {
        match self {
            ArgDefault::Text(s) => json!(s),
            ArgDefault::Float(f) => json!(f),
        }
    }
}

/// Required fields never carry a default; optional ones always do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    Required,
    Optional(ArgDefault),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgumentField {
    pub name: &'static str,
    pub arg_type: ArgType,
    pub description: &'static str,
    pub presence: Presence,
}

impl ArgumentField {
    pub const fn required_string(name: &'static str, description: &'static str) -> Self {
        Self { name, arg_type: ArgType::String, description, presence: Presence::Required }
    }

    pub const fn optional_string(
        name: &'static str,
        description: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            arg_type: ArgType::String,
            description,
            presence: Presence::Optional(ArgDefault::Text(default)),
        }
    }

    pub const fn optional_float(name: &'static str, description: &'static str, default: f64) -> Self {
        Self {
            name,
            arg_type: ArgType::Float,
            description,
            presence: Presence::Optional(ArgDefault::Float(default)),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    /// Check a caller-supplied value against the declared type and apply
    /// defaults. `raw` is `None` when the argument is absent or null.
    pub fn resolve(&self, raw: Option<&Value>) -> Result<ArgValue, InvocationError> {
        let value = match raw {
            None => None,
            Some(v) => Some(self.coerce(v)?),
        };
        let blank = matches!(&value, Some(ArgValue::Text(s)) if s.trim().is_empty());
        match (value, self.presence) {
            (Some(v), _) if !blank => Ok(v),
            (_, Presence::Required) => Err(InvocationError::MissingArgument(self.name.to_owned())),
            (_, Presence::Optional(default)) => Ok(default.to_value()),
        }
    }

    fn coerce(&self, v: &Value) -> Result<ArgValue, InvocationError> {
        let mismatch = || InvocationError::InvalidArgumentType {
            name: self.name.to_owned(),
            expected: self.arg_type.schema_type(),
        };
        match self.arg_type {
            ArgType::String => v.as_str().map(|s| ArgValue::Text(s.to_owned())).ok_or_else(mismatch),
            ArgType::Float => v.as_f64().map(ArgValue::Float).ok_or_else(mismatch),
        }
    }

    fn schema_property(&self) -> Value {
        let mut prop = json!({
            "type": self.arg_type.schema_type(),
            "description": self.description,
        });
        if let Presence::Optional(default) = self.presence {
            prop["default"] = default.to_json();
        }
        prop
    }
}

/// Build a JSON Schema object for an ordered field list.
pub fn input_schema(fields: &[ArgumentField]) -> JsonObject {
    let mut properties = JsonObject::new();
    for f in fields {
        properties.insert(f.name.to_owned(), f.schema_property());
    }
    let required: Vec<&str> = fields.iter().filter(|f| f.is_required()).map(|f| f.name).collect();

    let mut schema = JsonObject::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    schema.insert("required".into(), json!(required));
    schema
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Float(f64),
}

/// Arguments after validation: every declared field is present and typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: HashMap<&'static str, ArgValue>,
}

impl ToolArgs {
    pub fn insert(&mut self, name: &'static str, value: ArgValue) {
        self.values.insert(name, value);
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ArgValue::Float(f)) => Some(*f),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: JsonObject,
}

/// Wire shape of an invocation outcome: `{"result": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum InvocationResponse {
    Result(String),
    Error(String),
}

impl From<Result<String, InvocationError>> for InvocationResponse {
    fn from(res: Result<String, InvocationError>) -> Self {
        match res {
            Ok(text) => InvocationResponse::Result(text),
            Err(e) => InvocationResponse::Error(e.to_string()),
        }
    }
}
