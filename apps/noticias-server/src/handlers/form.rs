//! Multipart form reading for post submissions.

use actix_multipart::{Field, Multipart};
use futures::StreamExt;

use noticias_core::domain::{ImageUpload, NoticiaSubmission};

use crate::middleware::error::AppError;

/// Upper bound for a text field.
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// Read `titulo`, `conteudo` and `imagem` from a multipart body.
///
/// Unknown fields are drained and ignored. The image part may not exceed
/// `max_image_bytes`.
pub async fn read_submission(
    mut payload: Multipart,
    max_image_bytes: usize,
) -> Result<NoticiaSubmission, AppError> {
    let mut submission = NoticiaSubmission::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(malformed)?;
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some("titulo") => submission.titulo = Some(read_text(&mut field).await?),
            Some("conteudo") => submission.conteudo = Some(read_text(&mut field).await?),
            Some("imagem") => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_owned();
                let content_type = field.content_type().map(|m| m.essence_str().to_owned());
                let bytes = read_bytes(&mut field, max_image_bytes).await.map_err(|e| {
                    match e {
                        ReadError::TooLarge => AppError::PayloadTooLarge(
                            "A imagem excede o tamanho máximo permitido.".to_string(),
                        ),
                        ReadError::Stream(e) => malformed(e),
                    }
                })?;

                submission.imagem = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(malformed)?;
                }
            }
        }
    }

    Ok(submission)
}

enum ReadError {
    TooLarge,
    Stream(actix_multipart::MultipartError),
}

async fn read_bytes(field: &mut Field, limit: usize) -> Result<Vec<u8>, ReadError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(ReadError::Stream)?;
        if buf.len() + chunk.len() > limit {
            return Err(ReadError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let bytes = read_bytes(field, MAX_TEXT_FIELD_BYTES)
        .await
        .map_err(|e| match e {
            ReadError::TooLarge => {
                AppError::PayloadTooLarge("Campo de texto excede o tamanho máximo.".to_string())
            }
            ReadError::Stream(e) => malformed(e),
        })?;

    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest("Campo de texto com codificação inválida.".to_string()))
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    tracing::debug!(error = %err, "Malformed multipart body");
    AppError::BadRequest("Formulário inválido.".to_string())
}
