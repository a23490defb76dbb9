//! Route handlers

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::store::PredictionRecord;
use super::AppState;
use crate::classification::ClassificationResult;

/// Multipart field names accepted for the image
const IMAGE_FIELDS: [&str; 2] = ["image", "file"];

#[derive(Serialize)]
pub struct HealthResponse {
    server: &'static str,
    version: &'static str,
    filename_override: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        server: "online",
        version: env!("CARGO_PKG_VERSION"),
        filename_override: state.analyzer.config().filename_override,
    })
}

struct Upload {
    filename: Option<String>,
    bytes: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> ApiResult<Option<Upload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let is_image = field
            .name()
            .map(|name| IMAGE_FIELDS.contains(&name))
            .unwrap_or(false);
        if !is_image {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        return Ok(Some(Upload {
            filename,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// Classify an uploaded image and remember the result
pub async fn detect(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ClassificationResult>> {
    let upload = read_upload(&mut multipart).await?.ok_or(ApiError::NoImage)?;
    let image_name = upload.filename.clone().unwrap_or_default();
    tracing::debug!(image = %image_name, bytes = upload.bytes.len(), "received upload");

    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || {
        analyzer.analyze_bytes(&upload.bytes, upload.filename.as_deref())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))??;

    if result.is_rejected() {
        tracing::info!(image = %image_name, "upload is not a crop, not stored");
    } else {
        let record = state.predictions.insert(result.clone(), &image_name).await;
        tracing::info!(
            id = %record.id,
            disease = %result.disease,
            confidence = result.confidence,
            "stored prediction"
        );
    }

    Ok(Json(result))
}

pub async fn list_predictions(State(state): State<AppState>) -> Json<Vec<PredictionRecord>> {
    Json(state.predictions.list().await)
}

pub async fn delete_prediction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if state.predictions.remove(id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::NotFound(format!("prediction {id}")))
    }
}
