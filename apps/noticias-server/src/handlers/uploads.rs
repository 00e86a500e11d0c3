//! Serving stored images.

use actix_web::{HttpResponse, http::header, web};

use noticias_core::error::StorageError;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Content type for a stored image, from its extension.
pub fn content_type_for(file_name: &str) -> mime::Mime {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some("webp") => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// GET {upload_prefix}/{file_name}
pub async fn serve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let file_name = path.into_inner();
    let not_found = || AppError::NotFound("Arquivo não encontrado.".to_string());

    let bytes = match state.images.read(&file_name).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) | Err(StorageError::InvalidName(_)) => return Err(not_found()),
        Err(e) => {
            return Err(AppError::Internal {
                message: "Erro ao ler a imagem.".to_string(),
                cause: e.to_string(),
            });
        }
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&file_name))
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .body(bytes))
}
