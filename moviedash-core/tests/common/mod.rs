#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use moviedash_core::{Controller, MemorySessionStore, MovieClient, SharedSession};

/// 后端收到的一次请求
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub auth: Option<String>,
    pub body: String,
}

/// 各接口的预设响应（状态码 + 原始 body）
pub struct BackendState {
    pub login: (StatusCode, String),
    pub auth_check: (StatusCode, String),
    pub movies: (StatusCode, String),
    pub logout: (StatusCode, String),
    pub update: (StatusCode, String),
    /// 收到请求时把该会话换成新 token，模拟请求途中完成了另一次登录
    pub relogin: Option<(SharedSession, String)>,
    pub calls: Vec<Call>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            login: (StatusCode::OK, r#"{"token":"t-123","user":"admin"}"#.into()),
            auth_check: (StatusCode::OK, r#"{"user":"admin"}"#.into()),
            movies: (StatusCode::OK, r#"{"movies":[]}"#.into()),
            logout: (StatusCode::OK, r#"{"status":"logged_out"}"#.into()),
            update: (StatusCode::OK, r#"{"status":"ok"}"#.into()),
            relogin: None,
            calls: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }

    pub fn last_call(&self, path: &str) -> Option<Call> {
        self.calls().into_iter().rev().find(|c| c.path == path)
    }
}

async fn handle(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut state = backend.state();
    state.calls.push(Call {
        method,
        path: uri.path().to_string(),
        auth,
        body,
    });
    if let Some((session, token)) = &state.relogin {
        session.set(Some(token));
    }

    let (status, body) = match uri.path() {
        "/api/login" => state.login.clone(),
        "/api/auth/check" => state.auth_check.clone(),
        "/api/movies" => state.movies.clone(),
        "/api/logout" => state.logout.clone(),
        "/update" => state.update.clone(),
        _ => (StatusCode::NOT_FOUND, String::new()),
    };
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// 在随机端口启动假后端，返回 base url
pub async fn spawn(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/login", post(handle))
        .route("/api/auth/check", get(handle))
        .route("/api/movies", get(handle))
        .route("/api/logout", post(handle))
        .route("/update", get(handle))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// 一个没有进程监听的地址
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn controller(base_url: &str, token: Option<&str>) -> (Controller, SharedSession) {
    let session = MemorySessionStore::new().shared();
    session.set(token);
    let client = MovieClient::new(Some(base_url), session.clone()).unwrap();
    (Controller::new(client), session)
}

pub fn movies_json(count: usize) -> String {
    let movies: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "place": i,
                "movie_title": format!("Movie {i}"),
                "rating": 8.5,
                "year": "1999",
                "star_cast": "Someone",
                "imdb_id": format!("tt{i:07}"),
                "link": null,
            })
        })
        .collect();
    serde_json::json!({ "movies": movies }).to_string()
}
