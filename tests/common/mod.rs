#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const GOOD_TOKEN: &str = "signed.token.alice";
pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "hunter22";

#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub path: String,
    pub uid: Option<String>,
    pub authorization: Option<String>,
}

/// In-process stand-in for the tremor API.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub fail_meds: bool,
    pub unnamed_exercise: bool,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockBackend {
    pub fn failing_meds() -> Self {
        Self {
            fail_meds: true,
            ..Self::default()
        }
    }

    pub fn with_unnamed_exercise() -> Self {
        Self {
            unnamed_exercise: true,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.seen().into_iter().map(|r| r.path).collect();
        paths.sort();
        paths
    }

    fn record(&self, path: &str, query: &HashMap<String, String>, headers: &HeaderMap) {
        self.seen.lock().unwrap().push(SeenRequest {
            path: path.to_string(),
            uid: query.get("uid").cloned(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        });
    }

    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/api/tremors", get(tremors))
            .route("/api/meds", get(meds))
            .route("/api/exercises", get(exercises))
            .route("/api/users/links/in", get(links_in))
            .route("/api/auth/signin", post(signin))
            .route("/api/auth/signup", post(signup))
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == GOOD_TOKEN.as_bytes())
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

async fn tremors(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    backend.record("/api/tremors", &query, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        { "tid": 1, "uid": 1, "date": "2018-11-10T08:00:00Z", "resting": 50, "postural": 20 },
        { "tid": 2, "uid": 1, "date": "2018-11-11T08:00:00Z", "resting": 80, "postural": 40 }
    ]))
    .into_response()
}

async fn meds(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    backend.record("/api/meds", &query, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    if backend.fail_meds {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to get medicines from database").into_response();
    }
    Json(json!([
        {
            "mid": 1,
            "name": "Levodopa",
            "dosage": "100mg",
            "startdate": "2018-11-01T00:00:00Z",
            "enddate": null
        }
    ]))
    .into_response()
}

async fn exercises(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    backend.record("/api/exercises", &query, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut list = vec![json!({
        "eid": 1,
        "name": "Walking",
        "unit": "minutes",
        "startdate": "2018-11-02T00:00:00Z",
        "enddate": "2018-11-20T00:00:00Z"
    })];
    if backend.unnamed_exercise {
        list.push(json!({
            "eid": 2,
            "name": null,
            "unit": null,
            "startdate": "2018-11-05T00:00:00Z",
            "enddate": null
        }));
    }
    Json(list).into_response()
}

async fn links_in(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    backend.record("/api/users/links/in", &query, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([{ "uid": 2, "name": "Bob", "email": "bob@example.com" }])).into_response()
}

#[derive(Deserialize)]
struct Credentials {
    #[serde(default)]
    name: String,
    email: String,
    password: String,
}

async fn signin(State(backend): State<MockBackend>, Json(creds): Json<Credentials>) -> Response {
    backend.record("/api/auth/signin", &HashMap::new(), &HeaderMap::new());
    if creds.email == EMAIL && creds.password == PASSWORD {
        (StatusCode::OK, GOOD_TOKEN).into_response()
    } else {
        (StatusCode::FORBIDDEN, "invalid credentials").into_response()
    }
}

async fn signup(State(backend): State<MockBackend>, Json(creds): Json<Credentials>) -> Response {
    backend.record("/api/auth/signup", &HashMap::new(), &HeaderMap::new());
    if creds.name.is_empty() {
        return (StatusCode::BAD_REQUEST, "user must have a name").into_response();
    }
    if creds.password.len() < 6 {
        return (StatusCode::BAD_REQUEST, "password must be at least 6 characters").into_response();
    }
    if creds.email == EMAIL {
        return (StatusCode::CONFLICT, "user with this email already exists").into_response();
    }
    StatusCode::OK.into_response()
}

pub fn unique_token_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("tremor_dashboard_{tag}_{}_{}.json", std::process::id(), nanos));
    path
}

/// Answers every request with `status_line` and a body shorter than its
/// declared length, then hangs up.
pub async fn spawn_truncated(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await;
                let reply = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: text/plain\r\ncontent-length: 100\r\n\r\nshort"
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return;
        }
    }
}
