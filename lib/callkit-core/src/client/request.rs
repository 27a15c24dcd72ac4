use http::Method;
use http::header::{COOKIE, HeaderName, HeaderValue};
use indexmap::IndexMap;
use reqwest::{Body, Request};
use url::Url;

use super::ApiClientError;

/// A fully assembled HTTP request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Absolute URL, path substituted and query string appended.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Header names are kept exactly as provided.
    pub headers: IndexMap<String, String>,
    /// Serialized body, if any.
    pub body: Option<String>,
    /// Present only when at least one cookie parameter was given.
    pub cookies: Option<IndexMap<String, String>>,
}

impl RequestDescriptor {
    /// Renders the cookies as a `Cookie` header value: `name1=value1; name2=value2`.
    pub fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.as_ref()?;
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }

    /// Converts the descriptor into a reqwest request.
    ///
    /// Cookies are sent as a single `Cookie` header.
    ///
    /// # Errors
    ///
    /// Fails if the URL is not absolute and valid, or if a header name or value
    /// is not valid HTTP.
    pub fn to_reqwest(&self) -> Result<Request, ApiClientError> {
        let url = Url::parse(&self.url)?;
        let mut request = Request::new(self.method.clone(), url);
        let req_headers = request.headers_mut();

        for (name, value) in &self.headers {
            req_headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        if let Some(cookie_header) = self.cookie_header() {
            req_headers.insert(COOKIE, HeaderValue::from_str(&cookie_header)?);
        }

        if let Some(body) = &self.body {
            *request.body_mut() = Some(Body::from(body.clone()));
        }

        Ok(request)
    }
}
