// src/handlers/uploads.rs

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::{auth::AuthSession, i18n::Locale},
};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

// Remove componentes de caminho e insere um sufixo aleatório que garante
// unicidade, preservando a extensão.
fn unique_file_name(filename: &str) -> String {
    let base = std::path::Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");

    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            format!("{}-{}.{}", stem, Uuid::new_v4(), ext)
        }
        _ => format!("{}-{}", base, Uuid::new_v4()),
    }
}

// POST /api/uploads?filename=foto.jpg
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    params(
        ("filename" = String, Query, description = "Nome original do arquivo")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Arquivo gravado; retorna o caminho público"),
        (status = 400, description = "Nome ou conteúdo ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    locale: Locale,
    _session: AuthSession,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let filename = query
        .filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::InvalidUpload.to_api_error(&locale, &app_state.i18n_store))?;

    if body.is_empty() {
        return Err(AppError::InvalidUpload.to_api_error(&locale, &app_state.i18n_store));
    }

    let stored_name = unique_file_name(&filename);
    let target = std::path::Path::new(&app_state.upload_dir).join(&stored_name);

    let write_result = async {
        tokio::fs::create_dir_all(&app_state.upload_dir).await?;
        tokio::fs::write(&target, &body).await
    }
    .await;

    write_result.map_err(|e| {
        AppError::InternalServerError(anyhow::anyhow!("Falha ao gravar o upload: {}", e))
            .to_api_error(&locale, &app_state.i18n_store)
    })?;

    tracing::info!("Upload gravado em {}", target.display());

    Ok(response::created(serde_json::json!({
        "pathname": stored_name,
        "url": format!("/uploads/{}", stored_name),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_name_preserves_extension_and_differs_per_call() {
        let a = unique_file_name("casco.jpg");
        let b = unique_file_name("casco.jpg");
        assert!(a.starts_with("casco-"));
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn path_components_are_stripped() {
        let name = unique_file_name("../../etc/passwd");
        assert!(name.starts_with("passwd-"));
        assert!(!name.contains('/'));
    }
}
