//! Data Transfer Objects - response bodies of the noticias API.

use serde::{Deserialize, Serialize};

/// Body returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticiaIdResponse {
    pub noticia_id: i32,
}

/// Body returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoticiaResponse {
    pub message: String,
    pub noticia_id: i32,
}
