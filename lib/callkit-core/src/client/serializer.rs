use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

use super::models::{ModelRegistry, TypeKind};

/// Errors raised by a [`Serializer`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SerializationError {
    /// The type name is not known to the serializer.
    #[display("unknown type '{type_name}'")]
    #[from(skip)]
    UnknownType {
        /// The unknown type name.
        type_name: String,
    },

    /// The value does not have the shape required by its declared type.
    #[display("expected {expected} for type '{type_name}', got {value}")]
    #[from(skip)]
    UnexpectedValue {
        /// The declared type name.
        type_name: String,
        /// Description of the expected shape.
        expected: &'static str,
        /// The value that was provided.
        value: Value,
    },

    /// JSON encoding of a structured value failed.
    Json(serde_json::Error),
}

impl SerializationError {
    pub(in crate::client) fn unexpected(
        type_name: impl Into<String>,
        expected: &'static str,
        value: &Value,
    ) -> Self {
        Self::UnexpectedValue {
            type_name: type_name.into(),
            expected,
            value: value.clone(),
        }
    }
}

/// Turns a single value into its wire string, given its declared type name.
///
/// Implementations must be pure: the same value and type always give the same string.
pub trait Serializer: Debug + Send + Sync {
    /// Returns `true` if `type_name` can be serialized.
    fn knows(&self, type_name: &str) -> bool;

    /// Serializes `value` according to `type_name`.
    ///
    /// # Errors
    ///
    /// Fails with [`SerializationError::UnknownType`] when the type is not known,
    /// or when the value does not fit the type.
    fn serialize(&self, value: &Value, type_name: &str) -> Result<String, SerializationError>;
}

/// Scalar types understood by the [`JsonSerializer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Any,
}

impl Scalar {
    fn parse(type_name: &str) -> Option<Self> {
        let scalar = match type_name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "Date" | "date" | "date-time" => Self::Date,
            "any" => Self::Any,
            _ => return None,
        };
        Some(scalar)
    }
}

/// Default serializer.
///
/// Scalars (`string`, `number`, `integer`, `boolean`, `Date`, `any`) are rendered
/// as plain text, `null` as an empty string. Model types from the registry, arrays
/// and structured `any` values are JSON-encoded.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    models: Arc<ModelRegistry>,
}

impl JsonSerializer {
    /// Creates a serializer aware of the given model types.
    pub fn new(models: Arc<ModelRegistry>) -> Self {
        Self { models }
    }

    fn scalar_to_string(
        scalar: Scalar,
        value: &Value,
        type_name: &str,
    ) -> Result<String, SerializationError> {
        match (scalar, value) {
            (_, Value::Null) => Ok(String::new()),
            (Scalar::String | Scalar::Date | Scalar::Any, Value::String(text)) => Ok(text.clone()),
            (Scalar::String | Scalar::Any, Value::Number(number)) => Ok(number.to_string()),
            (Scalar::String | Scalar::Any, Value::Bool(flag)) => Ok(flag.to_string()),
            (Scalar::Number, Value::Number(number)) => Ok(number.to_string()),
            (Scalar::Integer, Value::Number(number)) if number.is_i64() || number.is_u64() => {
                Ok(number.to_string())
            }
            (Scalar::Boolean, Value::Bool(flag)) => Ok(flag.to_string()),
            (Scalar::Any, Value::Array(_) | Value::Object(_)) => Ok(serde_json::to_string(value)?),
            (Scalar::Integer, _) => Err(SerializationError::unexpected(
                type_name, "an integer", value,
            )),
            (Scalar::Number, _) => Err(SerializationError::unexpected(
                type_name, "a number", value,
            )),
            (Scalar::Boolean, _) => Err(SerializationError::unexpected(
                type_name, "a boolean", value,
            )),
            (Scalar::Date, _) => Err(SerializationError::unexpected(
                type_name,
                "a date string",
                value,
            )),
            (Scalar::String, _) => Err(SerializationError::unexpected(
                type_name, "a scalar", value,
            )),
        }
    }
}

impl Serializer for JsonSerializer {
    fn knows(&self, type_name: &str) -> bool {
        match self.models.resolve(type_name) {
            TypeKind::Model(_) => true,
            TypeKind::Array(item_type) => self.knows(item_type),
            TypeKind::Scalar(name) => Scalar::parse(name).is_some(),
        }
    }

    fn serialize(&self, value: &Value, type_name: &str) -> Result<String, SerializationError> {
        match self.models.resolve(type_name) {
            TypeKind::Model(_) => match value {
                Value::Null => Ok(String::new()),
                Value::Object(_) => Ok(serde_json::to_string(value)?),
                _ => Err(SerializationError::unexpected(type_name, "an object", value)),
            },
            TypeKind::Array(item_type) => {
                if !self.knows(item_type) {
                    return Err(SerializationError::UnknownType {
                        type_name: type_name.to_string(),
                    });
                }
                match value {
                    Value::Null => Ok(String::new()),
                    Value::Array(_) => Ok(serde_json::to_string(value)?),
                    _ => Err(SerializationError::unexpected(type_name, "an array", value)),
                }
            }
            TypeKind::Scalar(name) => {
                let scalar = Scalar::parse(name).ok_or_else(|| SerializationError::UnknownType {
                    type_name: name.to_string(),
                })?;
                Self::scalar_to_string(scalar, value, type_name)
            }
        }
    }
}
