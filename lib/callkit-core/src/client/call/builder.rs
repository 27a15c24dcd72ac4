use serde::Serialize;
use serde_json::Value;

use super::ApiCall;
use crate::client::parameters::{Argument, ParamLocation};
use crate::client::ApiClientError;

impl<T> ApiCall<T> {
    /// Records an argument.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiClientError::JsonValueError`] if the value cannot be
    /// represented as JSON. Type errors are reported when the call is executed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use callkit_core::{ApiClient, ConfigurationBuilder, ModelRegistry, ParamLocation};
    /// # fn example() -> Result<(), callkit_core::ApiClientError> {
    /// # let client = ApiClient::new(
    /// #     ConfigurationBuilder::new().add_server("https://api.example.com").build()?,
    /// #     ModelRegistry::new(),
    /// # );
    /// let call = client
    ///     .get("/pets")
    ///     .with_arg("tags", ["good", "dog"], "string[]", ParamLocation::Query)?
    ///     .with_arg("limit", 10, "integer", ParamLocation::Query)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_arg<V: Serialize>(
        self,
        name: impl Into<String>,
        value: V,
        type_name: impl Into<String>,
        location: ParamLocation,
    ) -> Result<Self, ApiClientError> {
        let value = serde_json::to_value(value)?;
        Ok(self.with_value(name, value, type_name, location))
    }

    /// Records an argument only when a value is present.
    ///
    /// # Errors
    ///
    /// Same as [`with_arg`](Self::with_arg).
    pub fn with_optional_arg<V: Serialize>(
        self,
        name: impl Into<String>,
        value: Option<V>,
        type_name: impl Into<String>,
        location: ParamLocation,
    ) -> Result<Self, ApiClientError> {
        match value {
            Some(value) => self.with_arg(name, value, type_name, location),
            None => Ok(self),
        }
    }

    /// Records an argument already held as JSON.
    pub fn with_value(
        mut self,
        name: impl Into<String>,
        value: Value,
        type_name: impl Into<String>,
        location: ParamLocation,
    ) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value,
            type_name: type_name.into(),
            location,
        });
        self
    }
}
