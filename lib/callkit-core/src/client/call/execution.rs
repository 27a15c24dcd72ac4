use std::future::{Future, IntoFuture};
use std::pin::Pin;

use http::Method;
use tracing::debug;

use super::ApiCall;
use crate::client::parameters::Parameter;
use crate::client::transport::Transport;
use crate::client::{ApiClient, ApiClientError, CallError, RequestDescriptor};

impl<T> ApiCall<T> {
    pub(in crate::client) fn build(client: ApiClient<T>, method: Method, route: String) -> Self {
        Self {
            client,
            method,
            route,
            arguments: Vec::new(),
        }
    }

    /// Flattens the recorded arguments, in order, through a fresh
    /// [`ParameterBuilder`](crate::ParameterBuilder).
    ///
    /// # Errors
    ///
    /// Returns the first argument failure, see
    /// [`ParameterBuilder::add`](crate::ParameterBuilder::add).
    pub fn parameters(&self) -> Result<Vec<Parameter>, ApiClientError> {
        let mut builder = self.client.parameter_builder();
        for argument in &self.arguments {
            builder.add_argument(argument)?;
        }
        Ok(builder.into_parameters())
    }

    /// Assembles the request without sending it.
    ///
    /// # Errors
    ///
    /// Fails if an argument cannot be flattened or the request cannot be assembled.
    pub fn to_request(&self) -> Result<RequestDescriptor, ApiClientError> {
        let parameters = self.parameters()?;
        self.client
            .assembler()
            .assemble(&self.route, self.method.clone(), &parameters)
    }
}

impl<T: Transport> ApiCall<T> {
    async fn exchange(self) -> Result<T::Response, CallError<T::Error>> {
        debug!(
            method = %self.method,
            route = %self.route,
            arguments = self.arguments.len(),
            "calling..."
        );
        let parameters = self.parameters()?;
        self.client
            .assembler()
            .build(&self.route, self.method.clone(), &parameters)
            .await
    }
}

/// Implement IntoFuture for ApiCall to enable direct .await syntax
///
/// ```rust,no_run
/// # use callkit_core::{ApiClient, ConfigurationBuilder, ModelRegistry, ParamLocation};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = ApiClient::new(
/// #     ConfigurationBuilder::new().add_server("https://api.example.com").build()?,
/// #     ModelRegistry::new(),
/// # );
/// let response = client
///     .get("/users/{id}")
///     .with_arg("id", 42, "integer", ParamLocation::Path)?
///     .await?;
/// # Ok(())
/// # }
/// ```
impl<T> IntoFuture for ApiCall<T>
where
    T: Transport + 'static,
{
    type Output = Result<T::Response, CallError<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}
