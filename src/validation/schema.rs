//! Declarative request schemas.
//!
//! A [`Schema`] is an ordered list of [`Field`]s. Each field is either
//! required or optional and carries a pipeline of [`Step`]s: type checks,
//! constraints, and transforms, applied left to right. The first failing
//! step produces the field's single [`Violation`].
//!
//! ```
//! use ping_service::validation::{Field, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new("example")
//!     .field(Field::optional("delay").string().parse_integer().positive());
//!
//! let fields = schema.validate(&json!({ "delay": "25" })).unwrap();
//! assert_eq!(fields["delay"], json!(25));
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

/// Whether a field may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// JSON type a value is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Number,
    Boolean,
}

impl ValueType {
    fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Number => value.is_number(),
            ValueType::Boolean => value.is_boolean(),
        }
    }
}

/// One stage of a field's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Value must have the given JSON type.
    Type(ValueType),
    /// String must contain at least one character.
    NonEmpty { message: &'static str },
    /// Transform: string of digits into an integer.
    ParseInteger,
    /// Number must be greater than zero.
    Positive,
}

impl Step {
    fn apply(&self, value: Value) -> Result<Value, String> {
        match self {
            Step::Type(expected) => {
                if expected.matches(&value) {
                    Ok(value)
                } else {
                    Err(format!("Expected {}, received {}", expected.name(), type_name(&value)))
                }
            }
            Step::NonEmpty { message } => match value.as_str() {
                Some("") => Err((*message).to_string()),
                Some(_) => Ok(value),
                None => Err(format!("Expected string, received {}", type_name(&value))),
            },
            Step::ParseInteger => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| format!("Expected string, received {}", type_name(&value)))?;
                raw.parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| format!("Expected integer, received {raw:?}"))
            }
            Step::Positive => match value.as_f64() {
                Some(n) if n > 0.0 => Ok(value),
                Some(_) => Err("Number must be greater than 0".to_string()),
                None => Err(format!("Expected number, received {}", type_name(&value))),
            },
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A named field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    presence: Presence,
    steps: Vec<Step>,
}

impl Field {
    /// Field that must be present.
    pub fn required(name: &'static str) -> Self {
        Self { name, presence: Presence::Required, steps: Vec::new() }
    }

    /// Field that may be absent; when absent it is skipped entirely.
    pub fn optional(name: &'static str) -> Self {
        Self { name, presence: Presence::Optional, steps: Vec::new() }
    }

    /// Require a JSON string.
    pub fn string(self) -> Self {
        self.step(Step::Type(ValueType::String))
    }

    /// Require a JSON boolean.
    pub fn boolean(self) -> Self {
        self.step(Step::Type(ValueType::Boolean))
    }

    /// Reject `""` with `message`.
    pub fn non_empty(self, message: &'static str) -> Self {
        self.step(Step::NonEmpty { message })
    }

    /// Coerce a string of digits into an integer.
    pub fn parse_integer(self) -> Self {
        self.step(Step::ParseInteger)
    }

    /// Require a number greater than zero.
    pub fn positive(self) -> Self {
        self.step(Step::Positive)
    }

    /// Append an arbitrary step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    fn check(&self, value: &Value) -> Result<Value, String> {
        self.steps.iter().try_fold(value.clone(), |current, step| step.apply(current))
    }
}

/// A single field failure, serialized into `error.details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    /// Create a violation at `path`; `""` is the input root.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

/// An immutable set of field declarations, validated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema; `name` only appears in logs.
    pub fn new(name: &'static str) -> Self {
        Self { name, fields: Vec::new() }
    }

    /// Append a field; fields are validated in the order added.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Schema name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Validate `input`, returning the transformed fields or every violation.
    ///
    /// Keys not declared by the schema are dropped from the output. Absent
    /// optional fields are skipped. `input` must be a JSON object.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, Vec<Violation>> {
        let object = match input {
            Value::Object(object) => object,
            other => {
                return Err(vec![Violation::new(
                    "",
                    format!("Expected object, received {}", type_name(other)),
                )])
            }
        };

        let mut output = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match (object.get(field.name), field.presence) {
                (None, Presence::Optional) => {}
                (None, Presence::Required) => {
                    violations.push(Violation::new(field.name, "Required"));
                }
                (Some(value), _) => match field.check(value) {
                    Ok(parsed) => {
                        output.insert(field.name.to_string(), parsed);
                    }
                    Err(message) => violations.push(Violation::new(field.name, message)),
                },
            }
        }

        if violations.is_empty() {
            Ok(output)
        } else {
            Err(violations)
        }
    }
}
