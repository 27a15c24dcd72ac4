use std::fmt;
use std::future::Future;

use tracing::debug;

use super::{ApiClientError, RequestDescriptor};

/// Sends an assembled request and returns the response.
///
/// The result is handed back to the caller unmodified: the core never retries,
/// times out or reinterprets a transport failure. Cancelling a call means
/// dropping its future.
pub trait Transport: Send + Sync {
    /// The response type.
    type Response: Send;
    /// The failure type.
    type Error: Send;

    /// Performs the network call.
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// Transport backed by a [`reqwest::Client`].
///
/// Returns the raw [`reqwest::Response`]; status codes are not checked.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Uses the given client, e.g. one configured with timeouts or a proxy.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;
    type Error = ApiClientError;

    async fn send(&self, request: RequestDescriptor) -> Result<Self::Response, Self::Error> {
        let request = request.to_reqwest()?;
        debug!(method = %request.method(), url = %request.url(), "sending...");
        let response = self.client.execute(request).await?;
        debug!(status = %response.status(), "...receiving");
        Ok(response)
    }
}

/// Transport built from a closure, see [`transport_fn`].
#[derive(Clone)]
pub struct FnTransport<F> {
    send: F,
}

/// Wraps a closure returning a future as a [`Transport`].
///
/// # Example
///
/// ```rust
/// use callkit_core::{RequestDescriptor, transport_fn};
///
/// let transport = transport_fn(|request: RequestDescriptor| async move {
///     Ok::<_, std::convert::Infallible>(request.url)
/// });
/// # let _ = transport;
/// ```
pub fn transport_fn<F>(send: F) -> FnTransport<F> {
    FnTransport { send }
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

impl<F, Fut, R, E> Transport for FnTransport<F>
where
    F: Fn(RequestDescriptor) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send,
    R: Send,
    E: Send,
{
    type Response = R;
    type Error = E;

    fn send(&self, request: RequestDescriptor) -> impl Future<Output = Result<R, E>> + Send {
        (self.send)(request)
    }
}
