//! Session extraction.
//!
//! A requester is signed in when it presents a valid session token, either in
//! the `session` cookie (browsers) or as `Authorization: Bearer <token>`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use noticias_core::ports::{AuthError, SessionClaims, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Signed-in requester, passed explicitly to handlers that need one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.subject)
    }
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject: claims.subject,
            name: claims.name,
        }
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    bearer
        .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
        .filter(|t| !t.is_empty())
}

/// Resolve the requester's identity from the request.
pub fn identify(req: &HttpRequest, tokens: &dyn TokenService) -> Result<Identity, AuthError> {
    let token = session_token(req).ok_or(AuthError::MissingSession)?;
    tokens.validate(&token).map(Identity::from)
}

fn identify_with_state(req: &HttpRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;
    identify(req, state.tokens.as_ref())
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify_with_state(req).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request without valid session");
            AppError::Unauthorized("Sessão inválida ou ausente.".to_string())
        }))
    }
}

/// Optional identity extractor - doesn't fail if not signed in.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(identify_with_state(req).ok())))
    }
}
