use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::{ParamLocation, Parameter};
use crate::client::error::ApiClientError;
use crate::client::models::{ModelDescriptor, ModelRegistry, TypeKind};
use crate::client::serializer::{SerializationError, Serializer};

/// A typed operation argument, recorded before being flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The argument name.
    pub name: String,
    /// The argument value.
    pub value: Value,
    /// The declared type name, e.g. `string`, `Pet` or `string[]`.
    pub type_name: String,
    /// Where the argument goes.
    pub location: ParamLocation,
}

/// Turns typed arguments into flat [`Parameter`] entries.
///
/// Call [`add`](Self::add) once per operation argument, in signature order.
/// The declared type selects one of three policies:
///
/// | type        | `path`                     | `body`            | `query` / `header` / `cookie`  |
/// |-------------|----------------------------|-------------------|--------------------------------|
/// | model       | `prop1,value1,prop2,value2`| whole value       | one parameter per property     |
/// | array       | `value1,value2`            | whole value       | one parameter per element      |
/// | scalar      | serialized value           | serialized value  | serialized value               |
///
/// # Example
///
/// ```rust
/// use callkit_core::{JsonSerializer, ModelDescriptor, ModelRegistry, ParamLocation, ParameterBuilder};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let models = Arc::new(ModelRegistry::new().with_model(
///     "Filter",
///     ModelDescriptor::new()
///         .add_property("status", "string")
///         .add_property("limit", "number"),
/// ));
/// let serializer = JsonSerializer::new(Arc::clone(&models));
///
/// let mut builder = ParameterBuilder::new(&models, &serializer);
/// builder
///     .add("id", &json!("42"), "string", ParamLocation::Path)?
///     .add("filter", &json!({"status": "active", "limit": 5}), "Filter", ParamLocation::Query)?;
///
/// let names: Vec<_> = builder.parameters().iter().map(|param| param.name()).collect();
/// assert_eq!(names, ["id", "status", "limit"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ParameterBuilder<'a> {
    models: &'a ModelRegistry,
    serializer: &'a dyn Serializer,
    parameters: Vec<Parameter>,
}

impl<'a> ParameterBuilder<'a> {
    /// Creates an empty builder.
    pub fn new(models: &'a ModelRegistry, serializer: &'a dyn Serializer) -> Self {
        Self {
            models,
            serializer,
            parameters: Vec::new(),
        }
    }

    /// Flattens one argument and appends the resulting parameters.
    ///
    /// On failure nothing is appended.
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::UnknownType`] if the type (or a property or element type)
    ///   is neither a model, an array, nor known to the serializer
    /// - [`ApiClientError::Serialization`] if the value does not fit its type
    pub fn add(
        &mut self,
        name: &str,
        value: &Value,
        type_name: &str,
        location: ParamLocation,
    ) -> Result<&mut Self, ApiClientError> {
        let added = match self.models.resolve(type_name) {
            TypeKind::Model(model) => self.flatten_model(name, value, type_name, model, location)?,
            TypeKind::Array(item_type) => {
                self.flatten_array(name, value, type_name, item_type, location)?
            }
            TypeKind::Scalar(scalar) => {
                self.ensure_known(name, scalar)?;
                let text = self.serialize(name, value, scalar)?;
                vec![Parameter::new(name, text, location)]
            }
        };

        trace!(name, type_name, %location, count = added.len(), "argument flattened");
        self.parameters.extend(added);
        Ok(self)
    }

    /// Like [`add`](Self::add), converting any serializable value first.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add), plus [`ApiClientError::JsonValueError`] if the
    /// value cannot be represented as JSON.
    pub fn add_serializable<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        type_name: &str,
        location: ParamLocation,
    ) -> Result<&mut Self, ApiClientError> {
        let value = serde_json::to_value(value)?;
        self.add(name, &value, type_name, location)
    }

    /// Flattens a recorded [`Argument`].
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_argument(&mut self, argument: &Argument) -> Result<&mut Self, ApiClientError> {
        self.add(
            &argument.name,
            &argument.value,
            &argument.type_name,
            argument.location,
        )
    }

    /// The parameters accumulated so far, in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Consumes the builder, returning the accumulated parameters.
    pub fn into_parameters(self) -> Vec<Parameter> {
        self.parameters
    }

    fn flatten_model(
        &self,
        name: &str,
        value: &Value,
        type_name: &str,
        model: &ModelDescriptor,
        location: ParamLocation,
    ) -> Result<Vec<Parameter>, ApiClientError> {
        if location == ParamLocation::Body {
            let body = self.serialize(name, value, type_name)?;
            return Ok(vec![Parameter::new(name, body, location)]);
        }

        let Value::Object(object) = value else {
            return Err(ApiClientError::Serialization {
                name: name.to_string(),
                source: SerializationError::unexpected(type_name, "an object", value),
            });
        };

        for prop in model.properties() {
            self.ensure_known(&format!("{name}.{}", prop.name), &prop.type_name)?;
        }

        let mut serialized = Vec::with_capacity(model.properties().len());
        for prop in model.properties() {
            let prop_value = object.get(&prop.name).unwrap_or(&Value::Null);
            let text = self.serialize(name, prop_value, &prop.type_name)?;
            serialized.push((prop.name.as_str(), text));
        }

        let result = if location == ParamLocation::Path {
            let joined = serialized
                .iter()
                .flat_map(|(prop_name, text)| [*prop_name, text.as_str()])
                .collect::<Vec<_>>()
                .join(",");
            vec![Parameter::new(name, joined, location)]
        } else {
            serialized
                .into_iter()
                .map(|(prop_name, text)| Parameter::new(prop_name, text, location))
                .collect()
        };
        Ok(result)
    }

    fn flatten_array(
        &self,
        name: &str,
        value: &Value,
        type_name: &str,
        item_type: &str,
        location: ParamLocation,
    ) -> Result<Vec<Parameter>, ApiClientError> {
        self.ensure_known(name, item_type)?;

        if location == ParamLocation::Body {
            let body = self.serialize(name, value, type_name)?;
            return Ok(vec![Parameter::new(name, body, location)]);
        }

        let Value::Array(items) = value else {
            return Err(ApiClientError::Serialization {
                name: name.to_string(),
                source: SerializationError::unexpected(type_name, "an array", value),
            });
        };

        let mut serialized = Vec::with_capacity(items.len());
        for item in items {
            serialized.push(self.serialize(name, item, item_type)?);
        }

        let result = if location == ParamLocation::Path {
            vec![Parameter::new(name, serialized.join(","), location)]
        } else {
            serialized
                .into_iter()
                .map(|text| Parameter::new(name, text, location))
                .collect()
        };
        Ok(result)
    }

    fn ensure_known(&self, name: &str, type_name: &str) -> Result<(), ApiClientError> {
        let known = match self.models.resolve(type_name) {
            TypeKind::Model(_) => true,
            TypeKind::Array(_) | TypeKind::Scalar(_) => self.serializer.knows(type_name),
        };
        if known {
            Ok(())
        } else {
            Err(ApiClientError::UnknownType {
                type_name: type_name.to_string(),
                name: name.to_string(),
            })
        }
    }

    fn serialize(&self, name: &str, value: &Value, type_name: &str) -> Result<String, ApiClientError> {
        self.serializer
            .serialize(value, type_name)
            .map_err(|source| ApiClientError::Serialization {
                name: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::serializer::JsonSerializer;

    fn registry() -> Arc<ModelRegistry> {
        Arc::new(
            ModelRegistry::new()
                .with_model(
                    "Filter",
                    ModelDescriptor::new()
                        .add_property("status", "string")
                        .add_property("limit", "number"),
                )
                .with_model(
                    "Broken",
                    ModelDescriptor::new().add_property("gadget", "Gadget"),
                ),
        )
    }

    fn texts(parameters: &[Parameter]) -> Vec<(&str, &str, ParamLocation)> {
        parameters
            .iter()
            .map(|param| {
                (param.name(), param.value(), param.location())
            })
            .collect()
    }

    #[test]
    fn should_add_scalar_as_single_parameter() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add("id", &json!("42"), "string", ParamLocation::Path)
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [("id", "42", ParamLocation::Path)]
        );
    }

    #[test]
    fn should_explode_model_outside_path_and_body() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));

        for location in [
            ParamLocation::Query,
            ParamLocation::Header,
            ParamLocation::Cookie,
        ] {
            let mut builder = ParameterBuilder::new(&models, &serializer);
            builder
                .add(
                    "filter",
                    &json!({"limit": 5, "status": "active"}),
                    "Filter",
                    location,
                )
                .expect("should add");

            assert_eq!(
                texts(builder.parameters()),
                [("status", "active", location), ("limit", "5", location)]
            );
        }
    }

    #[test]
    fn should_join_model_properties_in_path() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add(
                "filter",
                &json!({"status": "active", "limit": 5}),
                "Filter",
                ParamLocation::Path,
            )
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [("filter", "status,active,limit,5", ParamLocation::Path)]
        );
    }

    #[test]
    fn should_serialize_missing_model_property_as_empty() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add(
                "filter",
                &json!({"status": "active"}),
                "Filter",
                ParamLocation::Query,
            )
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [
                ("status", "active", ParamLocation::Query),
                ("limit", "", ParamLocation::Query)
            ]
        );
    }

    #[test]
    fn should_serialize_model_body_as_json() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add(
                "filter",
                &json!({"status": "active", "limit": 5}),
                "Filter",
                ParamLocation::Body,
            )
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [(
                "filter",
                r#"{"status":"active","limit":5}"#,
                ParamLocation::Body
            )]
        );
    }

    #[test]
    fn should_repeat_array_elements_outside_path() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add("tag", &json!(["a", "b", "c"]), "string[]", ParamLocation::Query)
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [
                ("tag", "a", ParamLocation::Query),
                ("tag", "b", ParamLocation::Query),
                ("tag", "c", ParamLocation::Query)
            ]
        );
    }

    #[test]
    fn should_join_array_elements_in_path() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add("ids", &json!([1, 2, 3]), "integer[]", ParamLocation::Path)
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [("ids", "1,2,3", ParamLocation::Path)]
        );
    }

    #[test]
    fn should_serialize_array_body_as_json() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add(
                "filters",
                &json!([{"status": "a", "limit": 1}]),
                "Filter[]",
                ParamLocation::Body,
            )
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [(
                "filters",
                r#"[{"status":"a","limit":1}]"#,
                ParamLocation::Body
            )]
        );
    }

    #[test]
    fn should_preserve_call_order() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add("first", &json!(1), "number", ParamLocation::Query)
            .and_then(|builder| {
                builder.add("tag", &json!(["x", "y"]), "string[]", ParamLocation::Query)
            })
            .and_then(|builder| builder.add("last", &json!(true), "boolean", ParamLocation::Header))
            .expect("should add");

        let names: Vec<_> = builder
            .into_parameters()
            .iter()
            .map(|param| param.name().to_string())
            .collect();
        assert_eq!(names, ["first", "tag", "tag", "last"]);
    }

    #[test]
    fn should_fail_on_unknown_type() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        let err = builder
            .add("widget", &json!({"a": 1}), "Widget", ParamLocation::Query)
            .expect_err("should fail");
        insta::assert_snapshot!(err, @"Unknown type 'Widget' for argument 'widget'");

        let err = builder
            .add("widgets", &json!([]), "Widget[]", ParamLocation::Query)
            .expect_err("should fail");
        insta::assert_snapshot!(err, @"Unknown type 'Widget' for argument 'widgets'");

        let err = builder
            .add("broken", &json!({"gadget": 1}), "Broken", ParamLocation::Header)
            .expect_err("should fail");
        insta::assert_snapshot!(err, @"Unknown type 'Gadget' for argument 'broken.gadget'");

        assert!(builder.parameters().is_empty());
    }

    #[test]
    fn should_append_nothing_on_failure() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        let err = builder
            .add("ids", &json!([1, "two", 3]), "integer[]", ParamLocation::Query)
            .expect_err("should fail");

        insta::assert_snapshot!(err, @r#"Failed to serialize argument 'ids': expected an integer for type 'integer', got "two""#);
        assert!(builder.parameters().is_empty());
    }

    #[test]
    fn should_reject_non_object_model() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        let err = builder
            .add("filter", &json!("active"), "Filter", ParamLocation::Query)
            .expect_err("should fail");

        assert!(matches!(err, ApiClientError::Serialization { .. }));
    }

    #[test]
    fn should_reject_non_object_model_body() {
        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        let err = builder
            .add("filter", &json!(5), "Filter", ParamLocation::Body)
            .expect_err("should fail");

        insta::assert_snapshot!(err, @"Failed to serialize argument 'filter': expected an object for type 'Filter', got 5");
        assert!(builder.parameters().is_empty());
    }

    #[derive(Debug)]
    struct TaggingSerializer;

    impl Serializer for TaggingSerializer {
        fn knows(&self, _type_name: &str) -> bool {
            true
        }

        fn serialize(&self, value: &Value, type_name: &str) -> Result<String, SerializationError> {
            Ok(format!("{type_name}:{value}"))
        }
    }

    #[test]
    fn should_use_serializer_for_body() {
        let models = registry();
        let mut builder = ParameterBuilder::new(&models, &TaggingSerializer);

        builder
            .add("filter", &json!({"status": "active"}), "Filter", ParamLocation::Body)
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [(
                "filter",
                r#"Filter:{"status":"active"}"#,
                ParamLocation::Body
            )]
        );
    }

    #[test]
    fn should_add_serializable_values() {
        #[derive(Serialize)]
        struct Filter {
            status: &'static str,
            limit: u32,
        }

        let models = registry();
        let serializer = JsonSerializer::new(Arc::clone(&models));
        let mut builder = ParameterBuilder::new(&models, &serializer);

        builder
            .add_serializable(
                "filter",
                &Filter {
                    status: "active",
                    limit: 5,
                },
                "Filter",
                ParamLocation::Cookie,
            )
            .expect("should add");

        assert_eq!(
            texts(builder.parameters()),
            [
                ("status", "active", ParamLocation::Cookie),
                ("limit", "5", ParamLocation::Cookie)
            ]
        );
    }
}
