use std::fmt;
use std::sync::Arc;

use http::Method;

mod assembler;
pub use self::assembler::RequestAssembler;

mod auth;
pub use self::auth::SecureString;

mod call;
pub use self::call::ApiCall;

mod config;
pub use self::config::{Configuration, ConfigurationBuilder, PathPolicy, Settings};

mod error;
pub use self::error::{ApiClientError, CallError};

mod models;
pub use self::models::{ARRAY_MARKER, ModelDescriptor, ModelRegistry, PropertyDescriptor, TypeKind};

mod parameters;
pub use self::parameters::{Argument, InvalidLocation, ParamLocation, Parameter, ParameterBuilder};

mod path;

mod request;
pub use self::request::RequestDescriptor;

mod serializer;
pub use self::serializer::{JsonSerializer, SerializationError, Serializer};

mod transport;
pub use self::transport::{FnTransport, ReqwestTransport, Transport, transport_fn};


/// Entry point used by generated operations.
///
/// `ApiClient` shares a read-only [`Configuration`], [`ModelRegistry`] and
/// [`Serializer`] between calls. Each call starts from an empty argument list,
/// so concurrent calls never interfere.
///
/// # Example
///
/// ```rust
/// use callkit_core::{ApiClient, ConfigurationBuilder, ModelRegistry, ParamLocation};
///
/// # fn example() -> Result<(), callkit_core::ApiClientError> {
/// let config = ConfigurationBuilder::new()
///     .add_server("https://api.example.com")
///     .build()?;
/// let client = ApiClient::new(config, ModelRegistry::new());
///
/// let request = client
///     .get("/users/{id}")
///     .with_arg("id", "42", "string", ParamLocation::Path)?
///     .to_request()?;
/// assert_eq!(request.url, "https://api.example.com/users/42");
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T> {
    config: Arc<Configuration<T>>,
    models: Arc<ModelRegistry>,
    serializer: Arc<dyn Serializer>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            models: Arc::clone(&self.models),
            serializer: Arc::clone(&self.serializer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("models", &self.models.len())
            .field("serializer", &self.serializer)
            .finish()
    }
}

// Create
impl<T> ApiClient<T> {
    /// Creates a client using the [`JsonSerializer`] over the given models.
    pub fn new(config: Configuration<T>, models: ModelRegistry) -> Self {
        let models = Arc::new(models);
        let serializer = Arc::new(JsonSerializer::new(Arc::clone(&models)));
        Self {
            config: Arc::new(config),
            models,
            serializer,
        }
    }

    /// Replaces the serializer.
    pub fn with_serializer(mut self, serializer: impl Serializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &Configuration<T> {
        &self.config
    }

    /// The model registry.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// A fresh parameter builder over this client's models and serializer.
    pub fn parameter_builder(&self) -> ParameterBuilder<'_> {
        ParameterBuilder::new(&self.models, self.serializer.as_ref())
    }

    /// An assembler over this client's configuration.
    pub fn assembler(&self) -> RequestAssembler<'_, T> {
        RequestAssembler::new(&self.config)
    }
}

impl<T> ApiClient<T> {
    /// Starts a call to `route` with the given method.
    pub fn call(&self, method: Method, route: impl Into<String>) -> ApiCall<T> {
        ApiCall::build(self.clone(), method, route.into())
    }

    /// Starts a `GET` call.
    pub fn get(&self, route: impl Into<String>) -> ApiCall<T> {
        self.call(Method::GET, route)
    }

    /// Starts a `POST` call.
    pub fn post(&self, route: impl Into<String>) -> ApiCall<T> {
        self.call(Method::POST, route)
    }

    /// Starts a `PUT` call.
    pub fn put(&self, route: impl Into<String>) -> ApiCall<T> {
        self.call(Method::PUT, route)
    }

    /// Starts a `DELETE` call.
    pub fn delete(&self, route: impl Into<String>) -> ApiCall<T> {
        self.call(Method::DELETE, route)
    }

    /// Starts a `PATCH` call.
    pub fn patch(&self, route: impl Into<String>) -> ApiCall<T> {
        self.call(Method::PATCH, route)
    }
}
