use crate::config::DashboardConfig;
use crate::errors::ClientError;
use crate::session::SessionStore;
use reqwest::header::AUTHORIZATION;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of an authenticated request. Redirecting is left to the caller.
#[derive(Debug)]
pub enum Fetch {
    /// No token was stored; nothing was sent.
    Unauthenticated,
    /// The backend rejected the token. It has already been cleared.
    Unauthorized(Response),
    Response(Response),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tremor-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ClientError> {
        Self::new(
            config.api_base_url.clone(),
            SessionStore::new(config.token_path.clone()),
        )
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn authed_get(&self, path: &str, query: &[(&str, String)]) -> Result<Fetch, ClientError> {
        let Some(token) = self.session.token().await? else {
            debug!("no session token, skipping GET {path}");
            return Ok(Fetch::Unauthenticated);
        };

        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .header(AUTHORIZATION, token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("backend rejected session token on GET {path}, clearing it");
            self.session.clear().await?;
            return Ok(Fetch::Unauthorized(response));
        }

        Ok(Fetch::Response(response))
    }

    /// Unauthenticated JSON post, used by the sign-in and sign-up forms.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Ok(response)
    }
}

/// Body text for user-facing messages. An unreadable body is logged and
/// replaced by the status reason.
pub async fn body_text(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!("failed to read {status} response body: {err}");
            status.canonical_reason().unwrap_or_default().to_string()
        }
    }
}
