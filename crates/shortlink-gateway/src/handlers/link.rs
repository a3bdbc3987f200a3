use crate::error::{AppError, Result};
use crate::model::{CreateLinkQuery, CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use tracing::info;

/// Pulls the target URL from `?url=` or, failing that, a JSON body.
fn extract_target(query: CreateLinkQuery, body: &[u8]) -> Result<String> {
    if let Some(url) = query.url {
        return Ok(url);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest(
            "missing url: pass it as ?url= or in a JSON body {\"url\": ...}".to_string(),
        ));
    }

    serde_json::from_slice::<CreateLinkRequest>(body)
        .map(|request| request.url)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
}

/// `POST /` and `POST /{ignored}`; the path segment carries no meaning.
pub async fn create_link_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<CreateLinkQuery>, QueryRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let target = extract_target(query, &body)?;
    let code = state.shortener().create_link(&target).await?;

    info!(code = %code, "short link created");

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_url: code.to_url(state.base_url()),
            code: code.to_string(),
        }),
    ))
}

/// `GET /{code}` answers with a temporary redirect to the stored target.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1])> {
    let target = state.shortener().get_link(&code).await?;
    // from_bytes keeps non-ASCII targets intact as obs-text.
    let location = HeaderValue::from_bytes(target.as_bytes())
        .map_err(|e| AppError::Internal(format!("stored target is not a valid header: {e}")))?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]))
}
