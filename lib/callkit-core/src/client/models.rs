//! Model type metadata.
//!
//! Generated clients describe their structured types with an ordered list of
//! `(property, type)` pairs. The [`ModelRegistry`] is handed to the
//! [`ParameterBuilder`](crate::ParameterBuilder) explicitly and is never mutated
//! once a client is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Suffix marking an array type, e.g. `string[]`.
pub const ARRAY_MARKER: &str = "[]";

/// A single declared property of a model type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// The property name, as it appears in the serialized object.
    pub name: String,
    /// The property type name.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Ordered property list of a model type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    #[serde(rename = "propertyTypes")]
    properties: Vec<PropertyDescriptor>,
}

impl ModelDescriptor {
    /// Creates a model without properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property, keeping declaration order.
    pub fn add_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// The properties in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
}

/// Registry of known model types, indexed by type name.
///
/// # Example
///
/// ```rust
/// use callkit_core::{ModelDescriptor, ModelRegistry, TypeKind};
///
/// let models = ModelRegistry::new().with_model(
///     "Filter",
///     ModelDescriptor::new()
///         .add_property("status", "string")
///         .add_property("limit", "number"),
/// );
///
/// assert!(matches!(models.resolve("Filter"), TypeKind::Model(_)));
/// assert!(matches!(models.resolve("Filter[]"), TypeKind::Array("Filter")));
/// assert!(matches!(models.resolve("string"), TypeKind::Scalar("string")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model type. A later registration replaces an earlier one.
    pub fn with_model(mut self, name: impl Into<String>, model: ModelDescriptor) -> Self {
        self.models.insert(name.into(), model);
        self
    }

    /// Loads a registry from its JSON form:
    /// `{"Pet": {"propertyTypes": [{"name": "id", "type": "integer"}]}}`.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the document does not match that shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Looks up a model type.
    pub fn get(&self, type_name: &str) -> Option<&ModelDescriptor> {
        self.models.get(type_name)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Checks if no model is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Classifies a type name.
    ///
    /// Registered models win over the array marker, so a model literally named
    /// `Foo[]` stays a model.
    pub fn resolve<'a>(&'a self, type_name: &'a str) -> TypeKind<'a> {
        if let Some(model) = self.models.get(type_name) {
            return TypeKind::Model(model);
        }
        match type_name.strip_suffix(ARRAY_MARKER) {
            Some(item_type) => TypeKind::Array(item_type),
            None => TypeKind::Scalar(type_name),
        }
    }
}

/// How a declared type is handled when building parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'a> {
    /// A registered model type.
    Model(&'a ModelDescriptor),
    /// An array type, carrying its element type name.
    Array(&'a str),
    /// Anything else, left to the serializer.
    Scalar(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_type_kinds() {
        let models = ModelRegistry::new()
            .with_model("Pet", ModelDescriptor::new().add_property("id", "integer"));

        let TypeKind::Model(pet) = models.resolve("Pet") else {
            panic!("Pet should be a model");
        };
        assert_eq!(pet.properties().len(), 1);
        assert_eq!(models.resolve("Pet[]"), TypeKind::Array("Pet"));
        assert_eq!(models.resolve("string[][]"), TypeKind::Array("string[]"));
        assert_eq!(models.resolve("boolean"), TypeKind::Scalar("boolean"));
        assert_eq!(models.len(), 1);
    }

    #[test]
    fn should_keep_property_declaration_order() {
        let model = ModelDescriptor::new()
            .add_property("zeta", "string")
            .add_property("alpha", "number")
            .add_property("mid", "boolean");

        let names: Vec<_> = model.properties().iter().map(|prop| prop.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn should_load_registry_from_json() {
        let models = ModelRegistry::from_json(
            r#"{
                "Filter": {
                    "propertyTypes": [
                        { "name": "status", "type": "string" },
                        { "name": "limit", "type": "number" }
                    ]
                },
                "Empty": { "propertyTypes": [] }
            }"#,
        )
        .expect("should parse registry");

        insta::assert_debug_snapshot!(models.get("Filter"), @r#"
        Some(
            ModelDescriptor {
                properties: [
                    PropertyDescriptor {
                        name: "status",
                        type_name: "string",
                    },
                    PropertyDescriptor {
                        name: "limit",
                        type_name: "number",
                    },
                ],
            },
        )
        "#);
        assert!(models.get("Empty").is_some_and(|model| model.properties().is_empty()));
        assert!(models.get("Missing").is_none());
    }
}
