//! HTTP client implementation.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use url::Url;

use paceline_core::error::{DecodeError, HttpStatusError};
use paceline_core::{ApiUrl, Error, LoginRedirect, NoRedirect, Result, Session};

use crate::endpoints::{AuthApi, ExerciseApi, ExportApi, PlanApi, VideoApi};

const DEFAULT_USER_AGENT: &str = concat!("paceline/", env!("CARGO_PKG_VERSION"));

/// Client for the running-analysis API.
///
/// Every request goes through the same path: the session's bearer token is
/// attached when one is held, and a 401 answer clears the session and fires
/// the login redirect before the error is returned. Cloning is cheap and
/// clones share the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api: ApiUrl,
    session: Session,
    redirect: Arc<dyn LoginRedirect>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    api: ApiUrl,
    session: Option<Session>,
    redirect: Option<Arc<dyn LoginRedirect>>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Use `session` for the token. Defaults to an empty in-memory session.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Hook called once each time the server ends the session.
    pub fn redirect(mut self, redirect: impl LoginRedirect + 'static) -> Self {
        self.redirect = Some(Arc::new(redirect));
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let http = reqwest::Client::builder()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .build()?;

        Ok(ApiClient {
            http,
            api: self.api,
            session: self.session.unwrap_or_else(Session::ephemeral),
            redirect: self.redirect.unwrap_or_else(|| Arc::new(NoRedirect)),
        })
    }
}

/// A successful non-JSON response.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub content_type: Option<String>,
    pub disposition: Option<String>,
    pub bytes: Vec<u8>,
}

/// Error body of the backend: `detail` is a message, or a list of field
/// errors for rejected request bodies.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiClient {
    /// Create a client with an explicit session and no login redirect.
    pub fn new(api: ApiUrl, session: Session) -> Result<Self> {
        Self::builder(api).session(session).build()
    }

    pub fn builder(api: ApiUrl) -> ApiClientBuilder {
        ApiClientBuilder {
            api,
            session: None,
            redirect: None,
            user_agent: None,
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Returns the session whose token this client sends.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn exercise(&self) -> ExerciseApi<'_> {
        ExerciseApi::new(self)
    }

    pub fn video(&self) -> VideoApi<'_> {
        VideoApi::new(self)
    }

    pub fn plan(&self) -> PlanApi<'_> {
        PlanApi::new(self)
    }

    pub fn export(&self) -> ExportApi<'_> {
        ExportApi::new(self)
    }

    /// GET a JSON resource.
    #[instrument(skip(self, query), fields(api = %self.api))]
    pub async fn get<Q, R>(&self, segments: &[&str], query: &Q) -> Result<R>
    where
        Q: Serialize + fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        trace!(?query, "query parameters");
        let builder = self.json_request(Method::GET, segments).query(query);
        self.send(builder).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.json_request(Method::POST, segments).json(body);
        self.send(builder).await
    }

    /// POST with parameters in the query string and no body.
    #[instrument(skip(self, query), fields(api = %self.api))]
    pub async fn post_query<Q, R>(&self, segments: &[&str], query: &Q) -> Result<R>
    where
        Q: Serialize + fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        trace!(?query, "query parameters");
        let builder = self.json_request(Method::POST, segments).query(query);
        self.send(builder).await
    }

    /// PUT a JSON body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn put<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.json_request(Method::PUT, segments).json(body);
        self.send(builder).await
    }

    /// DELETE a resource.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn delete<R>(&self, segments: &[&str]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let builder = self.json_request(Method::DELETE, segments);
        self.send(builder).await
    }

    /// POST a multipart form. The response must be JSON.
    #[instrument(skip(self, query, form), fields(api = %self.api))]
    pub(crate) async fn post_multipart<Q, R>(
        &self,
        segments: &[&str],
        query: &Q,
        form: Form,
    ) -> Result<R>
    where
        Q: Serialize + fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(segments);
        debug!(%url, "API multipart upload");
        trace!(?query, "query parameters");

        let builder = self
            .authorize(self.http.post(url))
            .query(query)
            .multipart(form);
        let response = builder.send().await?;
        let response = self.check_status(response, true).await?;

        let text = response.text().await?;
        trace!(len = text.len(), "upload response");
        serde_json::from_str(&text).map_err(|source| DecodeError::Upload { source }.into())
    }

    /// GET a binary resource. The body is returned as-is.
    #[instrument(skip(self, query), fields(api = %self.api))]
    pub(crate) async fn get_raw<Q>(&self, segments: &[&str], query: &Q) -> Result<RawResponse>
    where
        Q: Serialize + fmt::Debug + ?Sized,
    {
        let url = self.url(segments);
        debug!(%url, "API download");
        trace!(?query, "query parameters");

        let builder = self.authorize(self.http.get(url)).query(query);
        let response = builder.send().await?;
        let response = self.check_status(response, false).await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let disposition = header(CONTENT_DISPOSITION);
        let bytes = response.bytes().await?.to_vec();
        trace!(len = bytes.len(), "download complete");

        Ok(RawResponse {
            content_type,
            disposition,
            bytes,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        self.api.endpoint(segments)
    }

    /// Start a JSON request with the token attached.
    fn json_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "API request");
        self.authorize(self.http.request(method, url))
            .header(CONTENT_TYPE, "application/json")
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header(AUTHORIZATION, token.header_value()),
            None => builder,
        }
    }

    async fn send<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R> {
        let response = builder.send().await?;
        let response = self.check_status(response, true).await?;

        let body = response.bytes().await?;
        trace!(len = body.len(), "API response body");
        decode_json(&body)
    }

    /// Pass 2xx responses through and turn everything else into an error.
    ///
    /// With `parse_detail` unset the error body is not read.
    async fn check_status(
        &self,
        response: reqwest::Response,
        parse_detail: bool,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return Ok(response);
        }

        let message = if parse_detail {
            match response.bytes().await {
                Ok(body) => error_detail(&body),
                Err(e) => {
                    trace!(error = %e, "Failed to read error body");
                    None
                }
            }
        } else {
            None
        };

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.unauthorized(message));
        }
        Err(HttpStatusError::new(status.as_u16(), message).into())
    }

    /// Tear the session down and send the user to log in.
    fn unauthorized(&self, message: Option<String>) -> Error {
        self.session.invalidate();
        debug!("Redirecting to login");
        self.redirect.redirect_to_login();
        Error::Unauthorized { message }
    }
}

// Custom Debug impl since the redirect hook has none
impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api", &self.api)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Decode a success body. An empty body reads as JSON `null`.
fn decode_json<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    decoded.map_err(|source| DecodeError::Response { source }.into())
}

/// Pull a human-readable message out of an error body.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(message) => Some(message),
        serde_json::Value::Array(items) => items
            .first()?
            .get("msg")?
            .as_str()
            .map(str::to_string),
        _ => None,
    }
}
