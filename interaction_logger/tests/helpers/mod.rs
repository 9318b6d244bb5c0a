use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::post,
};
use interaction_logger::{HttpTransport, LOG_INTERACTION_PATH};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One request as seen by the stub endpoint.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: String,
}

impl Received {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
enum Reply {
    /// Behaves like the real endpoint: both ids must be present and non-zero.
    Validating,
    Fixed(StatusCode, &'static str),
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct StubServer {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubServer {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn transport(&self) -> HttpTransport {
        transport_for(&self.base_url)
    }
}

/// Transport that ignores any proxy configured in the environment.
pub fn transport_for(base_url: &str) -> HttpTransport {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpTransport::with_client(base_url, client).unwrap()
}

/// Serves a log endpoint that validates ids the way the production server does.
pub async fn spawn_log_endpoint() -> StubServer {
    spawn(Reply::Validating).await
}

/// Serves a log endpoint that always answers with `status` and the raw `body`.
pub async fn spawn_fixed(status: StatusCode, body: &'static str) -> StubServer {
    spawn(Reply::Fixed(status, body)).await
}

/// A base URL on which nothing is listening.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn spawn(reply: Reply) -> StubServer {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        received: received.clone(),
    };

    let app = Router::new()
        .route(LOG_INTERACTION_PATH, post(log_interaction))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        received,
    }
}

async fn log_interaction(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.received.lock().unwrap().push(Received {
        content_type,
        body: body.clone(),
    });

    let (status, reply) = match state.reply {
        Reply::Fixed(status, body) => (status, body.to_string()),
        Reply::Validating => validate(&body),
    };

    (status, [(CONTENT_TYPE, "application/json")], reply)
}

fn validate(body: &str) -> (StatusCode, String) {
    let Ok(data) = serde_json::from_str::<Value>(body) else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid input: No JSON data provided." }).to_string(),
        );
    };

    let present = |key: &str| data.get(key).and_then(Value::as_i64).is_some_and(|id| id != 0);
    if !(present("student_id") && present("content_id")) {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "student_id and content_id are required." }).to_string(),
        );
    }

    (
        StatusCode::CREATED,
        json!({ "status": "success", "message": "Interaction logged." }).to_string(),
    )
}
