//! HTTP boundary for the analyzer
//!
//! ```text
//! GET    /api/health            server status
//! POST   /api/detect            multipart upload → ClassificationResult
//! GET    /api/predictions       stored results, newest first
//! DELETE /api/predictions/:id   forget one result
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use store::{PredictionRecord, PredictionStore};

use crate::error::Result;
use crate::CropAnalyzer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<CropAnalyzer>,
    pub predictions: PredictionStore,
}

impl AppState {
    pub fn new(analyzer: CropAnalyzer, predictions: PredictionStore) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            predictions,
        }
    }

    /// Build state from server configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let analyzer = CropAnalyzer::new(config.analyzer_config()?)?;
        Ok(Self::new(
            analyzer,
            PredictionStore::new(config.max_stored_predictions),
        ))
    }
}

/// Create the router with all routes and layers
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/detect", post(handlers::detect))
        .route("/api/predictions", get(handlers::list_predictions))
        .route("/api/predictions/:id", delete(handlers::delete_prediction))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "crop-doctor-test-boundary";

    fn test_state() -> AppState {
        AppState::new(CropAnalyzer::default(), PredictionStore::new(100))
    }

    fn app(state: AppState) -> Router {
        router(state, 10 * 1024 * 1024)
    }

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    /// Noisy green leaf that passes the gate and reads as healthy
    fn leaf_png() -> Vec<u8> {
        let mut seed: u64 = 0x5eed;
        let mut next = move |span: i32| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((seed >> 33) % (2 * span as u64 + 1)) as i32 - span
        };
        let img = RgbImage::from_fn(224, 224, |_, _| {
            let n1 = next(40);
            let n2 = next(40);
            let d = next(5);
            Rgb([(60 + n1) as u8, (180 + n2) as u8, (60 + n1 + d) as u8])
        });
        encode_png(&img)
    }

    fn gray_png() -> Vec<u8> {
        encode_png(&RgbImage::from_pixel(224, 224, Rgb([128, 128, 128])))
    }

    fn multipart_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/detect")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_online() {
        let response = app(test_state()).oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["server"], "online");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["filename_override"], true);
    }

    #[tokio::test]
    async fn detect_without_image_is_bad_request() {
        let req = multipart_request("note", "note.txt", b"hello");
        let response = app(test_state()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"], "No image uploaded");
        assert_eq!(json["status"], 400);
    }

    #[tokio::test]
    async fn detect_rejects_undecodable_upload() {
        let req = multipart_request("image", "leaf.jpg", b"not really a jpeg");
        let response = app(test_state()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Could not read the image"));
    }

    #[tokio::test]
    async fn detect_classifies_and_stores() {
        let state = test_state();

        let req = multipart_request("image", "field_photo.png", &leaf_png());
        let response = app(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["disease"], "Healthy");
        assert_eq!(json["confidence"], 0.95);
        assert_eq!(json["crop"], "Cotton");
        assert_eq!(json["pathogen"], "Biological");

        let response = app(state.clone()).oneshot(get_request("/api/predictions")).await.unwrap();
        let json = response_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["image_name"], "field_photo.png");
        assert_eq!(records[0]["disease"], "Healthy");
        assert!(records[0]["id"].is_string());
    }

    #[tokio::test]
    async fn file_field_name_is_accepted() {
        let req = multipart_request("file", "leaf.png", &leaf_png());
        let response = app(test_state()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn not_a_crop_is_not_stored() {
        let state = test_state();

        let req = multipart_request("image", "wall.png", &gray_png());
        let response = app(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["disease"], "Not a Crop");
        assert_eq!(json["crop"], "Unknown Object");
        assert_eq!(json["confidence"], 0.0);
        assert!(state.predictions.is_empty().await);
    }

    #[tokio::test]
    async fn delete_prediction() {
        let state = test_state();
        let analysis = crate::classification::tests::plant_analysis();
        let result = crate::Classifier::default().classify(&analysis, None);
        let record = state.predictions.insert(result, "leaf.png").await;

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/predictions/{}", record.id))
            .body(Body::empty())
            .unwrap();
        let response = app(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.predictions.is_empty().await);

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/predictions/{}", record.id))
            .body(Body::empty())
            .unwrap();
        let response = app(state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
