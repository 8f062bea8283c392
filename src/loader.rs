use crate::errors::ClientError;
use crate::fetcher::{ApiClient, Fetch, body_text};
use crate::models::{Interval, Subject, SubjectId, TremorReading};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Tremors,
    Medications,
    Exercises,
}

impl Source {
    pub fn path(self) -> &'static str {
        match self {
            Source::Tremors => "/api/tremors",
            Source::Medications => "/api/meds",
            Source::Exercises => "/api/exercises",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Tremors => "tremors",
            Source::Medications => "medications",
            Source::Exercises => "exercises",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend answered {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Decode(String),
    #[error("session rejected")]
    Unauthorized,
}

pub type Series<T> = Result<Vec<T>, LoadError>;

/// One subject's data as fetched for a single render. A failed source is
/// kept as its error so the chart can leave it out.
#[derive(Debug, Clone)]
pub struct DataBundle {
    pub subject: SubjectId,
    pub tremors: Series<TremorReading>,
    pub medications: Series<Interval>,
    pub exercises: Series<Interval>,
}

impl DataBundle {
    pub fn failed_sources(&self) -> Vec<Source> {
        let mut failed = Vec::new();
        if self.tremors.is_err() {
            failed.push(Source::Tremors);
        }
        if self.medications.is_err() {
            failed.push(Source::Medications);
        }
        if self.exercises.is_err() {
            failed.push(Source::Exercises);
        }
        failed
    }

    fn any_unauthorized(&self) -> bool {
        [
            self.tremors.as_ref().err(),
            self.medications.as_ref().err(),
            self.exercises.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .any(|err| *err == LoadError::Unauthorized)
    }
}

#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(T),
    SignInRequired,
}

impl<T> LoadOutcome<T> {
    pub fn loaded(self) -> Option<T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            LoadOutcome::SignInRequired => None,
        }
    }
}

pub async fn load(client: &ApiClient, subject: SubjectId) -> Result<LoadOutcome<DataBundle>, ClientError> {
    if client.session().token().await?.is_none() {
        debug!("no session token, sign-in required before loading");
        return Ok(LoadOutcome::SignInRequired);
    }

    let query = subject_query(subject);
    let (tremors, medications, exercises) = tokio::join!(
        fetch_series::<TremorReading>(client, Source::Tremors, &query),
        fetch_series::<Interval>(client, Source::Medications, &query),
        fetch_series::<Interval>(client, Source::Exercises, &query),
    );

    let bundle = DataBundle {
        subject,
        tremors,
        medications,
        exercises,
    };

    if bundle.any_unauthorized() {
        return Ok(LoadOutcome::SignInRequired);
    }
    Ok(LoadOutcome::Loaded(bundle))
}

/// Subjects who have shared their data with the signed-in user.
pub async fn shared_subjects(client: &ApiClient) -> Result<LoadOutcome<Vec<Subject>>, ClientError> {
    let response = match client.authed_get("/api/users/links/in", &[]).await? {
        Fetch::Unauthenticated | Fetch::Unauthorized(_) => return Ok(LoadOutcome::SignInRequired),
        Fetch::Response(response) => response,
    };

    let status = response.status();
    if !status.is_success() {
        let body = body_text(response).await;
        return Err(ClientError::Status { status, body });
    }
    Ok(LoadOutcome::Loaded(response.json().await?))
}

fn subject_query(subject: SubjectId) -> Vec<(&'static str, String)> {
    if subject.is_self() {
        Vec::new()
    } else {
        vec![("uid", subject.0.to_string())]
    }
}

async fn fetch_series<T: DeserializeOwned>(
    client: &ApiClient,
    source: Source,
    query: &[(&str, String)],
) -> Series<T> {
    let result = request_series(client, source, query).await;
    if let Err(err) = &result {
        error!("failed to load {}: {err}", source.label());
    }
    result
}

async fn request_series<T: DeserializeOwned>(
    client: &ApiClient,
    source: Source,
    query: &[(&str, String)],
) -> Series<T> {
    let fetched = client
        .authed_get(source.path(), query)
        .await
        .map_err(|err| LoadError::Transport(err.to_string()))?;

    let response = match fetched {
        Fetch::Unauthenticated | Fetch::Unauthorized(_) => return Err(LoadError::Unauthorized),
        Fetch::Response(response) => response,
    };

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| LoadError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| LoadError::Decode(err.to_string()))
}
