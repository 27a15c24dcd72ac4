//! # Callkit Core
//!
//! Request assembly runtime for generated HTTP API clients.
//!
//! A generated operation records its typed arguments, each with a declared
//! type name and a location (`path`, `query`, `header`, `cookie` or `body`).
//! This crate turns them into one concrete HTTP request and hands it to a
//! pluggable [`Transport`]:
//!
//! - **[`ParameterBuilder`]** - flattens typed arguments into wire parameters
//! - **[`RequestAssembler`]** - builds URL, headers, body and cookies from them
//! - **[`ApiClient`]** / **[`ApiCall`]** - the entry point used by generated code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callkit_core::{ApiClient, ConfigurationBuilder, ModelRegistry, ParamLocation};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let models = ModelRegistry::from_json(r#"{
//!     "Filter": {
//!         "propertyTypes": [
//!             { "name": "status", "type": "string" },
//!             { "name": "limit", "type": "number" }
//!         ]
//!     }
//! }"#)?;
//!
//! let config = ConfigurationBuilder::new()
//!     .add_server("https://api.example.com")
//!     .with_bearer_token("abc")
//!     .build()?;
//! let client = ApiClient::new(config, models);
//!
//! // GET https://api.example.com/users/42?status=active&limit=5
//! let response = client
//!     .get("/users/{id}")
//!     .with_arg("id", "42", "string", ParamLocation::Path)?
//!     .with_arg("filter", serde_json::json!({"status": "active", "limit": 5}), "Filter", ParamLocation::Query)?
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Flattening Rules
//!
//! | type   | `path`                      | `body`            | other locations               |
//! |--------|-----------------------------|-------------------|-------------------------------|
//! | model  | `prop1,value1,prop2,value2` | whole value       | one parameter per property    |
//! | array  | `value1,value2`             | whole value       | one parameter per element     |
//! | scalar | serialized value            | serialized value  | serialized value              |
//!
//! Query parameters are only sent for `GET` requests. Header parameters
//! override the `accept`, `Content-Type` and `Authorization` defaults.
//!
//! ## Custom Transports
//!
//! Any async closure can be used as a transport, which is handy in tests:
//!
//! ```rust
//! use callkit_core::{ApiClient, ConfigurationBuilder, ModelRegistry, ParamLocation, RequestDescriptor, transport_fn};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigurationBuilder::new()
//!     .add_server("https://api.example.com")
//!     .with_transport(transport_fn(|request: RequestDescriptor| async move {
//!         Ok::<_, std::convert::Infallible>(request.url)
//!     }))
//!     .build()?;
//! let client = ApiClient::new(config, ModelRegistry::new());
//!
//! let url = client
//!     .get("/search")
//!     .with_arg("tag", ["a", "b"], "string[]", ParamLocation::Query)?
//!     .await?;
//! assert_eq!(url, "https://api.example.com/search?tag=a&tag=b");
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` for assembled and sent requests,
//! `trace` for flattened arguments, `warn` for unmatched path placeholders.
//! Bearer tokens are never logged.

mod client;

pub use self::client::{
    ARRAY_MARKER, ApiCall, ApiClient, ApiClientError, Argument, CallError, Configuration,
    ConfigurationBuilder, FnTransport, InvalidLocation, JsonSerializer, ModelDescriptor,
    ModelRegistry, ParamLocation, Parameter, ParameterBuilder, PathPolicy, PropertyDescriptor,
    RequestAssembler, RequestDescriptor, ReqwestTransport, SecureString, SerializationError,
    Serializer, Settings, Transport, TypeKind, transport_fn,
};
