//! Waitline API client
//!
//! Every call runs through the [`RequestAuthorizer`] before it is sent and
//! through the [`ResponseAuthorizer`] before the caller sees the outcome.

pub mod error;

use crate::interceptor::{RequestAuthorizer, ResponseAuthorizer};
use error::ClientError;
use reqwest::{Client, ClientBuilder, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use std::time::Duration;
use waitline_core::{CredentialStore, Navigator, RouteTable, View};

/// A request addressed by its API path (`/api/staff/queue`)
pub struct ApiRequest {
    path: String,
    builder: reqwest::RequestBuilder,
}

impl ApiRequest {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Send a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    /// Add query parameters
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.builder = self.builder.query(query);
        self
    }

    /// Add a header. An `Authorization` header set here is replaced or
    /// removed for role-scoped paths.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }
}

/// API client that attaches role credentials and reacts to rejections
#[derive(Clone)]
pub struct AuthorizedClient {
    client: Client,
    base_url: String,
    requests: RequestAuthorizer,
    responses: ResponseAuthorizer<View>,
}

impl AuthorizedClient {
    /// Create a new client builder
    pub fn builder() -> AuthorizedClientBuilder {
        AuthorizedClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path`, relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        let url = format!("{}{}", self.base_url, path);
        ApiRequest {
            path: path.to_string(),
            builder: self.client.request(method, url),
        }
    }

    pub fn get(&self, path: &str) -> ApiRequest {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> ApiRequest {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> ApiRequest {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> ApiRequest {
        self.request(Method::DELETE, path)
    }

    /// Send a request and return the raw successful response
    ///
    /// Non-success statuses become errors; a 401 purges the credential of
    /// the role the path belongs to before the error is returned.
    pub async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ClientError> {
        let ApiRequest { path, builder } = request;
        let mut built = builder.build()?;
        let role = self.requests.authorize_request(&path, &mut built);

        let response = self.client.execute(built).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        self.responses.on_failure(status, &path);
        tracing::debug!(path = %path, status = status.as_u16(), "API call failed");
        Err(ClientError::from_status(status, message, role))
    }

    /// Send a request and decode its JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Builder for [`AuthorizedClient`]
#[derive(Default)]
pub struct AuthorizedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<CredentialStore>,
    routes: Option<Rc<RouteTable<View>>>,
    navigator: Option<Rc<dyn Navigator>>,
}

impl AuthorizedClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout (ignored on wasm)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Credential store the interceptors read and purge
    pub fn credentials(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Route table deciding whether the current location is protected
    pub fn routes(mut self, routes: Rc<RouteTable<View>>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Navigator used to redirect after a rejection
    pub fn navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AuthorizedClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let store = self
            .store
            .ok_or_else(|| ClientError::Configuration("credential store is required".into()))?;
        let navigator = self
            .navigator
            .ok_or_else(|| ClientError::Configuration("navigator is required".into()))?;
        let routes = self
            .routes
            .unwrap_or_else(|| Rc::new(RouteTable::standard()));

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| concat!("waitline-client/", env!("CARGO_PKG_VERSION")).to_string()),
        );

        let client = client_builder.build()?;

        Ok(AuthorizedClient {
            client,
            base_url,
            requests: RequestAuthorizer::new(store.clone()),
            responses: ResponseAuthorizer::new(store, routes, navigator),
        })
    }
}
