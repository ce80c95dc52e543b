use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::{data_file, ConfigStore};
use crate::session::SessionStore;

pub const TOKEN_HEADER: &str = "x-vega-token";

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Counter behind the infinity-loop endpoints. The phase walks the
/// 3-5-8 sequence, one step per iteration.
#[derive(Debug, Default)]
pub struct InfinityLoop {
    pub active: bool,
    pub iteration: u64,
    phase_index: usize,
}

const PHASES: [u8; 3] = [3, 5, 8];

impl InfinityLoop {
    pub fn start(&mut self) {
        self.active = true;
        self.iteration = 0;
        self.phase_index = 0;
    }

    pub fn iterate(&mut self) {
        self.iteration += 1;
        self.phase_index = (self.phase_index + 1) % PHASES.len();
    }

    pub fn phase(&self) -> u8 {
        PHASES[self.phase_index]
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigStore>,
    pub sessions: Arc<SessionStore>,
    pub infinity: Arc<Mutex<InfinityLoop>>,
    pub admin_password: Arc<String>,
    pub data_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, admin_password: String) -> Self {
        Self {
            config: Arc::new(ConfigStore::new(&data_dir)),
            sessions: Arc::new(SessionStore::new()),
            infinity: Arc::new(Mutex::new(InfinityLoop::default())),
            admin_password: Arc::new(admin_password),
            data_dir: Arc::new(data_dir),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
    #[serde(rename = "expiresAt")]
    expires_at: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

pub fn create_router(state: AppState, public_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/api/config", get(get_config).post(update_config))
        .route("/api/manifest", get(get_manifest))
        .route("/api/modules", get(get_modules))
        .route("/api/soundscapes", get(get_soundscapes))
        .route("/api/whitepaper", get(get_whitepaper))
        .route("/api/infinity", get(get_infinity))
        .route("/api/heartbeat", get(heartbeat))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/infinity-loop/start", post(infinity_start))
        .route("/api/infinity-loop/iterate", post(infinity_iterate));
    if let Some(dir) = public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    if !state.sessions.validate(token) {
        return Err(AppError::Unauthorized);
    }
    Ok(token.to_string())
}

async fn heartbeat() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": now_ms() }))
}

async fn get_config(State(state): State<AppState>) -> Json<Value> {
    Json(state.config.load())
}

// Merge the stored manifest with the live site block and endpoint map.
async fn get_manifest(State(state): State<AppState>) -> Json<Value> {
    let mut manifest = data_file(&state.data_dir, "manifest");
    let config = state.config.load();
    if let Value::Object(obj) = &mut manifest {
        let mut endpoints = obj
            .get("endpoints")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        for name in ["config", "manifest", "whitepaper", "soundscapes", "modules"] {
            endpoints.insert(name.to_string(), Value::String(format!("/api/{name}")));
        }
        obj.insert("endpoints".into(), Value::Object(endpoints));
        obj.insert("generatedAt".into(), json!(now_ms()));
        obj.insert("site".into(), config["site"].clone());
    }
    Json(manifest)
}

async fn get_modules(State(state): State<AppState>) -> Json<Value> {
    Json(data_file(&state.data_dir, "modules"))
}

async fn get_soundscapes(State(state): State<AppState>) -> Json<Value> {
    Json(data_file(&state.data_dir, "soundscapes"))
}

async fn get_whitepaper(State(state): State<AppState>) -> Json<Value> {
    Json(data_file(&state.data_dir, "whitepaper"))
}

async fn get_infinity(State(state): State<AppState>) -> Json<Value> {
    Json(data_file(&state.data_dir, "infinity"))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.password != *state.admin_password {
        return Err(AppError::Forbidden("Invalid credentials".into()));
    }
    let (token, session) = state.sessions.issue();
    info!("admin session issued");
    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
    }))
}

async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    authenticate(&state, &headers)?;
    let merged = state
        .config
        .merge(patch)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(merged))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = authenticate(&state, &headers)?;
    state.sessions.remove(&token);
    Ok(Json(json!({ "success": true })))
}

async fn infinity_start(State(state): State<AppState>) -> Json<Value> {
    let mut lp = state.infinity.lock();
    lp.start();
    Json(json!({ "active": lp.active, "iteration": lp.iteration, "phase": lp.phase() }))
}

async fn infinity_iterate(State(state): State<AppState>) -> Json<Value> {
    let mut lp = state.infinity.lock();
    lp.iterate();
    Json(json!({ "active": lp.active, "iteration": lp.iteration, "phase": lp.phase() }))
}

pub enum AppError {
    Unauthorized,
    Forbidden(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    const PASSWORD: &str = "test-password";

    fn test_app() -> (Router, AppState, TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), PASSWORD.to_string());
        let router = create_router(state.clone(), None);
        (router, state, dir)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn login_token(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_post("/api/login", json!({ "password": PASSWORD })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn heartbeat_reports_ok() {
        let (app, _, _dir) = test_app();
        let response = app
            .oneshot(Request::get("/api/heartbeat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn config_get_serves_generated_default() {
        let (app, _, _dir) = test_app();
        let response = app
            .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["site"]["title"], "Vega Foundation");
        assert_eq!(body["engines"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn manifest_carries_site_and_endpoint_map() {
        let (app, _, _dir) = test_app();
        let response = app
            .oneshot(Request::get("/api/manifest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["endpoints"]["config"], "/api/config");
        assert_eq!(body["endpoints"]["modules"], "/api/modules");
        assert_eq!(body["site"]["theme"], "chrome-glass");
        assert!(body["generatedAt"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn wrong_password_is_forbidden() {
        let (app, state, _dir) = test_app();
        let response = app
            .oneshot(json_post("/api/login", json!({ "password": "nope" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_config_write_leaves_the_file_untouched() {
        let (app, state, _dir) = test_app();
        // materialize the config file
        state.config.load();
        let before = std::fs::read(state.config.path()).unwrap();

        // no token at all
        let response = app
            .clone()
            .oneshot(json_post("/api/config", json!({ "site": { "title": "Hax" } })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // made-up token
        let request = Request::post("/api/config")
            .header("content-type", "application/json")
            .header(TOKEN_HEADER, "forged-token")
            .body(Body::from(json!({ "site": { "title": "Hax" } }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let after = std::fs::read(state.config.path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn authenticated_config_write_merges_and_persists() {
        let (app, state, _dir) = test_app();
        let token = login_token(&app).await;

        let request = Request::post("/api/config")
            .header("content-type", "application/json")
            .header(TOKEN_HEADER, &token)
            .body(Body::from(json!({ "site": { "title": "Renamed" } }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["site"]["title"], "Renamed");

        let on_disk = state.config.load();
        assert_eq!(on_disk["site"]["title"], "Renamed");
        assert_eq!(on_disk["soundscapes"]["defaultEngine"], "stellar");
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let (app, state, _dir) = test_app();
        let token = login_token(&app).await;
        assert!(state.sessions.validate(&token));

        let request = Request::post("/api/logout")
            .header(TOKEN_HEADER, &token)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.sessions.validate(&token));

        // the dead token no longer authenticates
        let request = Request::post("/api/config")
            .header("content-type", "application/json")
            .header(TOKEN_HEADER, &token)
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (app, state, _dir) = test_app();
        state.sessions.insert_expired("stale");
        let request = Request::post("/api/config")
            .header("content-type", "application/json")
            .header(TOKEN_HEADER, "stale")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn infinity_loop_counts_and_cycles_phases() {
        let (app, _, _dir) = test_app();
        let response = app
            .clone()
            .oneshot(json_post("/api/infinity-loop/start", json!({})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["active"], true);
        assert_eq!(body["iteration"], 0);
        assert_eq!(body["phase"], 3);

        let mut phases = Vec::new();
        for _ in 0..4 {
            let response = app
                .clone()
                .oneshot(json_post("/api/infinity-loop/iterate", json!({})))
                .await
                .unwrap();
            phases.push(body_json(response).await["phase"].as_u64().unwrap());
        }
        assert_eq!(phases, vec![5, 8, 3, 5]);
    }

    #[tokio::test]
    async fn data_endpoints_serve_defaults() {
        let (app, _, _dir) = test_app();
        for uri in ["/api/modules", "/api/soundscapes", "/api/whitepaper", "/api/infinity"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
