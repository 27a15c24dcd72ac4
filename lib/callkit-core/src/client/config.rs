use serde::{Deserialize, Serialize};

use super::auth::SecureString;
use super::transport::{ReqwestTransport, Transport};
use super::ApiClientError;

/// What to do with a path placeholder that no parameter fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPolicy {
    /// Leave the placeholder in place and log a warning.
    #[default]
    Lenient,
    /// Fail with [`ApiClientError::PathUnresolved`].
    Strict,
}

/// Serializable part of a [`Configuration`], e.g. loaded from a JSON file.
///
/// ```rust
/// use callkit_core::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{
///     "basePath": "",
///     "servers": ["https://api.example.com", "https://staging.example.com"],
///     "selectedServerIndex": 1,
///     "bearerToken": "abc"
/// }"#)?;
/// assert_eq!(settings.selected_server_index, 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Prefix placed before the server URL.
    pub base_path: Option<String>,
    /// Candidate server base URLs.
    pub servers: Vec<String>,
    /// Index of the server to use.
    pub selected_server_index: usize,
    /// Bearer token sent in the `Authorization` header.
    pub bearer_token: Option<SecureString>,
    /// Handling of unmatched path placeholders.
    pub path_policy: PathPolicy,
}

/// Read-only client configuration: where requests go, how they are
/// authenticated, and which [`Transport`] sends them.
///
/// Built with [`ConfigurationBuilder`].
#[derive(Debug, Clone)]
pub struct Configuration<T> {
    base_path: Option<String>,
    servers: Vec<String>,
    selected_server_index: usize,
    bearer_token: Option<SecureString>,
    path_policy: PathPolicy,
    transport: T,
}

impl Configuration<ReqwestTransport> {
    /// Creates a [`ConfigurationBuilder`] using the reqwest transport.
    pub fn builder() -> ConfigurationBuilder<ReqwestTransport> {
        ConfigurationBuilder::new()
    }
}

impl<T> Configuration<T> {
    /// Prefix placed before the server URL.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Candidate server base URLs.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Index of the selected server.
    pub fn selected_server_index(&self) -> usize {
        self.selected_server_index
    }

    /// The selected server base URL.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiClientError::InvalidServerIndex`] when the index is out of range.
    pub fn selected_server(&self) -> Result<&str, ApiClientError> {
        self.servers
            .get(self.selected_server_index)
            .map(String::as_str)
            .ok_or(ApiClientError::InvalidServerIndex {
                index: self.selected_server_index,
                count: self.servers.len(),
            })
    }

    /// Bearer token, if any.
    pub fn bearer_token(&self) -> Option<&SecureString> {
        self.bearer_token.as_ref()
    }

    /// Handling of unmatched path placeholders.
    pub fn path_policy(&self) -> PathPolicy {
        self.path_policy
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Builder for [`Configuration`].
///
/// # Default Configuration
///
/// - **Base path**: none
/// - **Servers**: empty, at least one must be added
/// - **Selected server**: `0`
/// - **Bearer token**: none
/// - **Path policy**: [`PathPolicy::Lenient`]
/// - **Transport**: [`ReqwestTransport`] with a default `reqwest::Client`
///
/// # Example
///
/// ```rust
/// use callkit_core::{ConfigurationBuilder, PathPolicy};
///
/// # fn example() -> Result<(), callkit_core::ApiClientError> {
/// let config = ConfigurationBuilder::new()
///     .add_server("https://api.example.com/v1")
///     .add_server("https://staging.example.com/v1")
///     .with_selected_server(1)
///     .with_bearer_token("my-token")
///     .with_path_policy(PathPolicy::Strict)
///     .build()?;
///
/// assert_eq!(config.selected_server()?, "https://staging.example.com/v1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder<T> {
    settings: Settings,
    transport: T,
}

impl ConfigurationBuilder<ReqwestTransport> {
    /// Creates a builder using the reqwest transport.
    pub fn new() -> Self {
        Self::from_settings(Settings::default())
    }

    /// Creates a builder seeded with loaded settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            transport: ReqwestTransport::default(),
        }
    }
}

impl Default for ConfigurationBuilder<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConfigurationBuilder<T> {
    /// Sets the prefix placed before the server URL.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.settings.base_path = Some(base_path.into());
        self
    }

    /// Appends a server base URL.
    pub fn add_server(mut self, server: impl Into<String>) -> Self {
        self.settings.servers.push(server.into());
        self
    }

    /// Replaces the server list.
    pub fn with_servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    /// Selects the server to use by index.
    pub fn with_selected_server(mut self, index: usize) -> Self {
        self.settings.selected_server_index = index;
        self
    }

    /// Sets the bearer token sent in the `Authorization` header.
    pub fn with_bearer_token(mut self, token: impl Into<SecureString>) -> Self {
        self.settings.bearer_token = Some(token.into());
        self
    }

    /// Sets how unmatched path placeholders are handled.
    pub fn with_path_policy(mut self, path_policy: PathPolicy) -> Self {
        self.settings.path_policy = path_policy;
        self
    }

    /// Replaces the transport.
    pub fn with_transport<U: Transport>(self, transport: U) -> ConfigurationBuilder<U> {
        ConfigurationBuilder {
            settings: self.settings,
            transport,
        }
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiClientError::InvalidServerIndex`] when the selected index
    /// does not point into the server list.
    pub fn build(self) -> Result<Configuration<T>, ApiClientError> {
        let Self {
            settings:
                Settings {
                    base_path,
                    servers,
                    selected_server_index,
                    bearer_token,
                    path_policy,
                },
            transport,
        } = self;

        if selected_server_index >= servers.len() {
            return Err(ApiClientError::InvalidServerIndex {
                index: selected_server_index,
                count: servers.len(),
            });
        }

        Ok(Configuration {
            base_path,
            servers,
            selected_server_index,
            bearer_token,
            path_policy,
            transport,
        })
    }
}
