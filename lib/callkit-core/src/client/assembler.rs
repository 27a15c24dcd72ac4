use http::Method;
use indexmap::IndexMap;
use tracing::debug;

use super::auth::AUTHORIZATION;
use super::config::Configuration;
use super::parameters::{ParamLocation, Parameter};
use super::path::substitute_path;
use super::transport::Transport;
use super::{ApiClientError, CallError, RequestDescriptor};

const JSON: &str = "application/json";

/// Folds flat [`Parameter`] entries and a [`Configuration`] into one
/// [`RequestDescriptor`], then hands it to the configured [`Transport`].
///
/// Steps, in order:
///
/// 1. `path` parameters are percent-encoded into their `{name}` placeholders
/// 2. the URL is `base path + selected server + path`
/// 3. for `GET`, `query` parameters become the query string, duplicates kept
/// 4. headers: `accept` and `Content-Type` set to JSON, then a non-empty bearer token,
///    then the `header` parameters (so an explicit `Authorization` wins)
/// 5. the first `body` parameter becomes the body
/// 6. `cookie` parameters become the cookie map, omitted when there are none
#[derive(Debug)]
pub struct RequestAssembler<'a, T> {
    config: &'a Configuration<T>,
}

impl<'a, T> RequestAssembler<'a, T> {
    /// Creates an assembler reading the given configuration.
    pub fn new(config: &'a Configuration<T>) -> Self {
        Self { config }
    }

    /// Assembles the request without sending it.
    ///
    /// # Errors
    ///
    /// - [`ApiClientError::PathUnresolved`] for unmatched placeholders with
    ///   [`PathPolicy::Strict`](crate::PathPolicy::Strict)
    /// - [`ApiClientError::InvalidServerIndex`] if no server is selected
    /// - [`ApiClientError::QuerySerializationError`] if the query string cannot be encoded
    pub fn assemble(
        &self,
        route: &str,
        method: Method,
        parameters: &[Parameter],
    ) -> Result<RequestDescriptor, ApiClientError> {
        let path = substitute_path(route, parameters, self.config.path_policy())?;

        let mut url = [
            self.config.base_path().unwrap_or_default(),
            self.config.selected_server()?,
            path.as_str(),
        ]
        .concat();

        if let Some(query) = Self::query_string(&method, parameters)? {
            url.push('?');
            url.push_str(&query);
        }

        let headers = self.headers(parameters);
        let body = parameters
            .iter()
            .find(|param| param.location() == ParamLocation::Body)
            .map(|param| param.value().to_string());
        let cookies = Self::cookies(parameters);

        debug!(%method, url = %url, "request assembled");
        Ok(RequestDescriptor {
            url,
            method,
            headers,
            body,
            cookies,
        })
    }

    fn query_string(
        method: &Method,
        parameters: &[Parameter],
    ) -> Result<Option<String>, ApiClientError> {
        let pairs = parameters
            .iter()
            .filter(|param| param.location() == ParamLocation::Query)
            .map(|param| (param.name(), param.value()))
            .collect::<Vec<_>>();

        if pairs.is_empty() {
            return Ok(None);
        }
        if *method != Method::GET {
            debug!(%method, count = pairs.len(), "query parameters dropped");
            return Ok(None);
        }

        let query = serde_urlencoded::to_string(&pairs)?;
        Ok(Some(query))
    }

    fn headers(&self, parameters: &[Parameter]) -> IndexMap<String, String> {
        let mut headers = IndexMap::from([
            ("accept".to_string(), JSON.to_string()),
            ("Content-Type".to_string(), JSON.to_string()),
        ]);

        if let Some(token) = self
            .config
            .bearer_token()
            .filter(|token| !token.is_empty())
        {
            headers.insert(AUTHORIZATION.to_string(), token.to_bearer());
        }

        for param in parameters
            .iter()
            .filter(|param| param.location() == ParamLocation::Header)
        {
            headers.insert(param.name().to_string(), param.value().to_string());
        }

        headers
    }

    fn cookies(parameters: &[Parameter]) -> Option<IndexMap<String, String>> {
        let mut cookies: Option<IndexMap<String, String>> = None;
        for param in parameters
            .iter()
            .filter(|param| param.location() == ParamLocation::Cookie)
        {
            cookies
                .get_or_insert_with(IndexMap::new)
                .insert(param.name().to_string(), param.value().to_string());
        }
        cookies
    }
}

impl<T: Transport> RequestAssembler<'_, T> {
    /// Assembles the request and awaits the transport.
    ///
    /// The transport result is returned unmodified.
    ///
    /// # Errors
    ///
    /// [`CallError::Request`] if assembly fails (nothing is sent), or
    /// [`CallError::Transport`] with the original transport error.
    pub async fn build(
        &self,
        route: &str,
        method: Method,
        parameters: &[Parameter],
    ) -> Result<T::Response, CallError<T::Error>> {
        let request = self.assemble(route, method, parameters)?;
        self.config
            .transport()
            .send(request)
            .await
            .map_err(CallError::Transport)
    }
}
