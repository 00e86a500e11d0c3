//! Post API handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use noticias_shared::dto::{DeleteNoticiaResponse, NoticiaIdResponse};

use crate::handlers::form::read_submission;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::Identity;
use crate::state::AppState;

pub const MSG_LIST_FAILED: &str = "Erro ao obter notícias.";
pub const MSG_GET_FAILED: &str = "Erro ao obter a notícia.";
pub const MSG_CREATE_FAILED: &str = "Erro ao criar notícia.";
pub const MSG_UPDATE_FAILED: &str = "Erro ao atualizar a notícia.";
pub const MSG_DELETE_FAILED: &str = "Erro ao excluir a notícia.";
pub const MSG_DELETED: &str = "Notícia excluída com sucesso.";

/// GET /api/noticias
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let noticias = state
        .noticias
        .list()
        .await
        .map_err(|e| AppError::from_domain(e, MSG_LIST_FAILED))?;

    Ok(HttpResponse::Ok().json(noticias))
}

/// POST /api/noticias
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let submission = read_submission(payload, state.uploads.max_bytes).await?;

    let noticia_id = state
        .noticias
        .create(submission)
        .await
        .map_err(|e| AppError::from_domain(e, MSG_CREATE_FAILED))?;

    tracing::info!(noticia_id, editor = %identity.subject, "Noticia created via API");
    Ok(HttpResponse::Ok().json(NoticiaIdResponse { noticia_id }))
}

/// GET /api/noticias/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let noticia = state
        .noticias
        .get(&path)
        .await
        .map_err(|e| AppError::from_domain(e, MSG_GET_FAILED))?;

    Ok(HttpResponse::Ok().json(noticia))
}

/// PUT /api/noticias/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let submission = read_submission(payload, state.uploads.max_bytes).await?;

    let noticia_id = state
        .noticias
        .update(&path, submission)
        .await
        .map_err(|e| AppError::from_domain(e, MSG_UPDATE_FAILED))?;

    tracing::info!(noticia_id, editor = %identity.subject, "Noticia updated via API");
    Ok(HttpResponse::Ok().json(NoticiaIdResponse { noticia_id }))
}

/// DELETE /api/noticias/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let noticia_id = state
        .noticias
        .delete(&path)
        .await
        .map_err(|e| AppError::from_domain(e, MSG_DELETE_FAILED))?;

    tracing::info!(noticia_id, editor = %identity.subject, "Noticia deleted via API");
    Ok(HttpResponse::Ok().json(DeleteNoticiaResponse {
        message: MSG_DELETED.to_string(),
        noticia_id,
    }))
}
