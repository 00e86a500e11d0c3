//! Shared fixtures for handler and page tests.

use std::sync::Arc;

use tempfile::TempDir;

use noticias_infra::{InMemoryNoticiaRepository, JwtConfig, JwtTokenService, LocalImageStore};

use crate::config::UploadConfig;
use crate::state::{AppState, StorageBackend};

const BOUNDARY: &str = "noticias-test-boundary";

/// State backed by the in-memory repository and a temporary upload directory.
/// Keep `dir` alive for the duration of the test.
pub struct TestContext {
    pub state: AppState,
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_upload_limit(1024 * 1024)
    }

    pub fn with_upload_limit(max_bytes: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadConfig {
            dir: dir.path().to_path_buf(),
            public_prefix: "/uploads".to_string(),
            max_bytes,
        };

        let state = AppState::from_parts(
            Arc::new(InMemoryNoticiaRepository::new()),
            Arc::new(LocalImageStore::new(dir.path(), "/uploads")),
            Arc::new(JwtTokenService::new(JwtConfig {
                secret: "handler-test-secret".to_string(),
                ..JwtConfig::default()
            })),
            uploads,
            Some("https://accounts.example.com/signin".to_string()),
            StorageBackend::InMemory,
        );

        Self { state, dir }
    }

    /// A valid session token for a test editor.
    pub fn token(&self) -> String {
        self.state
            .tokens
            .issue("editor@example.com", Some("Editora"))
            .unwrap()
    }

    /// `Authorization` header value carrying a valid session.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

/// Initialise the full application service around a state.
macro_rules! test_app {
    ($state:expr) => {{
        let state: $crate::state::AppState = $state.clone();
        let prefix = state.uploads.public_prefix.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::middleware::guard::RouteGuard)
                .app_data(actix_web::web::Data::new(state))
                .configure(move |cfg| $crate::handlers::configure_routes(cfg, &prefix)),
        )
    }};
}

pub(crate) use test_app;

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// `(content-type header value, body)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.body,
        )
    }
}

/// Title, content and a 10-byte JPEG.
pub fn full_submission(titulo: &str, conteudo: &str) -> (String, Vec<u8>) {
    MultipartBody::new()
        .text("titulo", titulo)
        .text("conteudo", conteudo)
        .file("imagem", "photo.jpg", "image/jpeg", &[7u8; 10])
        .finish()
}
