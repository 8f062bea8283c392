use crate::auth::{self, AuthOutcome, Page};
use crate::chart::ChartSpec;
use crate::errors::AppError;
use crate::loader::{self, LoadOutcome};
use crate::models::{RangeRequest, SignInForm, SignUpForm, Subject, SubjectQuery};
use crate::state::AppState;
use crate::ui::{SIGNIN_HTML, SIGNUP_HTML, render_dashboard};
use crate::view::DashboardView;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, Utc};

/// Page load: starts a fresh view with a new color pool.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SubjectQuery>,
) -> Result<Response, AppError> {
    let bundle = match loader::load(&state.client, query.subject()).await? {
        LoadOutcome::SignInRequired => return Ok(Redirect::to(Page::SignIn.path()).into_response()),
        LoadOutcome::Loaded(bundle) => bundle,
    };

    let mut view = state.view.lock().await;
    *view = DashboardView::new(state.palette_size);
    let spec = view.render(&bundle, Utc::now());
    let chart_json = serde_json::to_string(spec).map_err(AppError::internal)?;

    Ok(Html(render_dashboard(&chart_json, &bundle.failed_sources())).into_response())
}

pub async fn signin_page() -> Html<&'static str> {
    Html(SIGNIN_HTML)
}

pub async fn signup_page() -> Html<&'static str> {
    Html(SIGNUP_HTML)
}

/// Subject switch: reloads into the current view.
pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<SubjectQuery>,
) -> Result<Json<ChartSpec>, AppError> {
    let bundle = loader::load(&state.client, query.subject())
        .await?
        .loaded()
        .ok_or_else(AppError::unauthorized)?;

    let mut view = state.view.lock().await;
    Ok(Json(view.render(&bundle, Utc::now()).clone()))
}

pub async fn set_range(
    State(state): State<AppState>,
    Json(payload): Json<RangeRequest>,
) -> Result<Json<ChartSpec>, AppError> {
    let mut view = state.view.lock().await;
    let spec = view.apply_range(payload.range, &Local::now())?;
    Ok(Json(spec.clone()))
}

pub async fn get_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = loader::shared_subjects(&state.client)
        .await?
        .loaded()
        .ok_or_else(AppError::unauthorized)?;
    Ok(Json(subjects))
}

pub async fn signin(
    State(state): State<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, AppError> {
    let outcome = auth::sign_in(&state.client, &form).await?;
    Ok(auth_response(outcome))
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignUpForm>,
) -> Result<Response, AppError> {
    let outcome = auth::sign_up(&state.client, &form).await?;
    Ok(auth_response(outcome))
}

pub async fn signout(State(state): State<AppState>) -> Result<Response, AppError> {
    let outcome = auth::sign_out(&state.client).await?;
    Ok(auth_response(outcome))
}

fn auth_response(outcome: AuthOutcome) -> Response {
    match outcome {
        AuthOutcome::Navigate(page) => Redirect::to(page.path()).into_response(),
        AuthOutcome::Invalid(message) => (StatusCode::UNPROCESSABLE_ENTITY, message).into_response(),
        AuthOutcome::Alert { status, message } => {
            let status = status
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (status, message).into_response()
        }
    }
}
