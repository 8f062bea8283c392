use crate::errors::ClientError;
use crate::fetcher::{ApiClient, body_text};
use crate::models::{SignInForm, SignUpForm, SignUpRequest};
use reqwest::StatusCode;
use tracing::{info, warn};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    SignIn,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/index.html",
            Page::SignIn => "/signin.html",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Shown to the user verbatim. `status` is absent when the request
    /// never got an answer.
    Alert {
        status: Option<StatusCode>,
        message: String,
    },
    /// Form rejected locally; nothing was sent.
    Invalid(String),
    Navigate(Page),
}

/// Custom-validity message for the confirm-password field. Empty means
/// valid.
pub fn password_validity(password: &str, confirm: &str) -> &'static str {
    if password != confirm { PASSWORD_MISMATCH } else { "" }
}

pub async fn sign_in(client: &ApiClient, form: &SignInForm) -> Result<AuthOutcome, ClientError> {
    let response = match client.post_json("/api/auth/signin", form).await {
        Ok(response) => response,
        Err(err) => return Ok(unreachable_backend(err)),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return Ok(unreachable_backend(err.into())),
    };

    if status != StatusCode::OK {
        warn!("sign-in for {} rejected with {status}", form.email);
        return Ok(AuthOutcome::Alert {
            status: Some(status),
            message: body,
        });
    }

    client.session().store(&body).await?;
    info!("signed in as {}", form.email);
    Ok(AuthOutcome::Navigate(Page::Dashboard))
}

pub async fn sign_up(client: &ApiClient, form: &SignUpForm) -> Result<AuthOutcome, ClientError> {
    let validity = password_validity(&form.password, &form.confirm_password);
    if !validity.is_empty() {
        return Ok(AuthOutcome::Invalid(validity.to_string()));
    }

    let request = SignUpRequest {
        name: &form.name,
        email: &form.email,
        password: &form.password,
    };
    let response = match client.post_json("/api/auth/signup", &request).await {
        Ok(response) => response,
        Err(err) => return Ok(unreachable_backend(err)),
    };

    let status = response.status();
    if status != StatusCode::OK {
        let message = body_text(response).await;
        warn!("sign-up for {} rejected with {status}", form.email);
        return Ok(AuthOutcome::Alert {
            status: Some(status),
            message,
        });
    }

    info!("registered {}", form.email);
    Ok(AuthOutcome::Navigate(Page::SignIn))
}

pub async fn sign_out(client: &ApiClient) -> Result<AuthOutcome, ClientError> {
    client.session().clear().await?;
    info!("signed out");
    Ok(AuthOutcome::Navigate(Page::SignIn))
}

fn unreachable_backend(err: ClientError) -> AuthOutcome {
    warn!("auth request failed: {err}");
    AuthOutcome::Alert {
        status: None,
        message: err.to_string(),
    }
}
