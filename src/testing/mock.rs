//! Stateless stand-in for the auth API, served over real HTTP
//!
//! # Example
//!
//! ```no_run
//! use auth_smoke::testing::{MockAuthApi, MockServer};
//!
//! #[actix_web::test]
//! async fn test_against_mock() {
//!     let server = MockServer::start(MockAuthApi::strict()).unwrap();
//!     // point a harness at server.base_url()
//!     server.stop().await;
//! }
//! ```

use std::io;
use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use crate::cases::{TEST_EMAIL, TEST_PASSWORD};

pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";
pub const MOCK_REFRESH_TOKEN: &str = "mock-refresh-token";
pub const MOCK_USER_ID: &str = "1";
pub const MOCK_USER_NAME: &str = "Test User";

/// Behaviour of the mock auth endpoints
#[derive(Debug, Clone)]
pub struct MockAuthApi {
    /// Reject unknown credentials and tokens with 401
    strict: bool,
    /// Bearer tokens `/auth/me` accepts in strict mode
    tokens: Vec<String>,
}

impl MockAuthApi {
    /// Accepts any credentials and any bearer token, answering 200
    pub fn lenient() -> Self {
        Self {
            strict: false,
            tokens: vec![MOCK_ACCESS_TOKEN.to_string()],
        }
    }

    /// Answers 401 for wrong credentials and unknown tokens
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    /// Also accept `token` on `/auth/me`
    pub fn accept_token(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    fn accepts(&self, token: &str) -> bool {
        !self.strict || self.tokens.iter().any(|known| known == token)
    }
}

/// Register the mock auth routes
pub fn routes(cfg: &mut web::ServiceConfig, api: MockAuthApi) {
    cfg.app_data(web::Data::new(api))
        .route("/auth/signup", web::post().to(signup))
        .route("/auth/login", web::post().to(login))
        .route("/auth/me", web::get().to(me))
        .route("/auth/logout", web::post().to(logout))
        .route("/auth/refresh", web::post().to(refresh))
        .route("/auth/forgot-password", web::post().to(forgot_password))
        .route("/auth/reset-password", web::post().to(reset_password));
}

/// Running mock server bound to an ephemeral local port
pub struct MockServer {
    addr: SocketAddr,
    handle: ServerHandle,
}

impl MockServer {
    pub fn start(api: MockAuthApi) -> io::Result<Self> {
        Self::start_with(move |cfg: &mut web::ServiceConfig| routes(cfg, api.clone()))
    }

    /// Serve arbitrary routes, e.g. a single canned response
    ///
    /// Must be called from within an actix runtime.
    pub fn start_with<F>(configure: F) -> io::Result<Self>
    where
        F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
    {
        let server = HttpServer::new(move || App::new().configure(configure.clone()))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))?;

        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| io::Error::other("mock server bound no address"))?;

        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        tracing::debug!(%addr, "Mock auth API listening");

        Ok(Self { addr, handle })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Base URL of a local port with nothing listening on it
pub fn refused_base_url() -> io::Result<String> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let addr = listener.local_addr()?;
    drop(listener);

    Ok(format!("http://{}", addr))
}

fn payload(body: &web::Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn text<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload.get(field).and_then(Value::as_str)
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "error": message }))
}

fn user(email: &str, name: &str) -> Value {
    json!({ "id": MOCK_USER_ID, "email": email, "name": name })
}

fn tokens(user: Value) -> Value {
    json!({
        "user": user,
        "accessToken": MOCK_ACCESS_TOKEN,
        "refreshToken": MOCK_REFRESH_TOKEN,
    })
}

async fn signup(body: web::Bytes) -> HttpResponse {
    let payload = payload(&body);

    let (Some(email), Some(password), Some(name)) = (
        text(&payload, "email"),
        text(&payload, "password"),
        text(&payload, "name"),
    ) else {
        return bad_request("email, password and name are required");
    };

    if !looks_like_email(email) {
        return bad_request("Invalid email");
    }
    if password.len() < 8 {
        return bad_request("Password must be at least 8 characters");
    }

    HttpResponse::Created().json(tokens(user(email, name)))
}

async fn login(api: web::Data<MockAuthApi>, body: web::Bytes) -> HttpResponse {
    let payload = payload(&body);

    let (Some(email), Some(password)) = (text(&payload, "email"), text(&payload, "password")) else {
        return bad_request("email and password are required");
    };

    if !looks_like_email(email) || password.len() < 6 {
        return bad_request("Invalid login payload");
    }
    if api.strict && (email != TEST_EMAIL || password != TEST_PASSWORD) {
        return unauthorized("Invalid credentials");
    }

    HttpResponse::Ok().json(tokens(user(email, MOCK_USER_NAME)))
}

async fn me(api: web::Data<MockAuthApi>, req: HttpRequest) -> HttpResponse {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if api.accepts(token) => HttpResponse::Ok().json(user(TEST_EMAIL, MOCK_USER_NAME)),
        Some(_) => unauthorized("Invalid token"),
        None => unauthorized("Missing authorization header"),
    }
}

async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Logged out successfully" }))
}

async fn refresh(body: web::Bytes) -> HttpResponse {
    let payload = payload(&body);

    match text(&payload, "refreshToken") {
        Some(token) if !token.is_empty() => HttpResponse::Ok().json(json!({
            "accessToken": MOCK_ACCESS_TOKEN,
            "refreshToken": MOCK_REFRESH_TOKEN,
        })),
        _ => bad_request("refreshToken is required"),
    }
}

async fn forgot_password(body: web::Bytes) -> HttpResponse {
    let payload = payload(&body);

    match text(&payload, "email") {
        Some(email) if looks_like_email(email) => HttpResponse::Ok().json(json!({
            "message": "If the account exists, a reset link has been sent",
        })),
        _ => bad_request("A valid email is required"),
    }
}

async fn reset_password(body: web::Bytes) -> HttpResponse {
    let payload = payload(&body);

    match (text(&payload, "token"), text(&payload, "newPassword")) {
        (Some(_), Some(password)) if password.len() >= 8 => HttpResponse::Ok().json(json!({
            "message": "Password has been reset",
        })),
        _ => bad_request("token and a newPassword of at least 8 characters are required"),
    }
}
