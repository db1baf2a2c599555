//! Sentence splitting endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /split`
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// Raw text to segment; empty text is valid
    pub text: String,
}

/// Response body for `POST /split`
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    /// Segmented sentences in source order
    pub sentences: Vec<String>,
}

/// `POST /split` - segment the request text into sentences
///
/// Returns 503 while the model is not loaded; empty input returns an empty
/// sentence list with success status.
pub async fn split_sentences(
    State(state): State<AppState>,
    Json(request): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, ApiError> {
    let splitter = state.slot.get()?;

    if request.text.is_empty() {
        return Ok(Json(SplitResponse {
            sentences: Vec::new(),
        }));
    }

    // Inference is CPU-bound; keep it off the async workers.
    let sentences =
        tokio::task::spawn_blocking(move || splitter.split(&request.text))
            .await
            .map_err(|e| ApiError::from(cheikhei_core::CoreError::Inference(e.to_string())))??;

    Ok(Json(SplitResponse { sentences }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use cheikhei_core::{
        BoundaryModel, ModelSlot, SentenceSplitter, SubwordTokenizer, Token,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::state::AppState;

    struct WordTokenizer;

    impl SubwordTokenizer for WordTokenizer {
        fn tokenize(&self, text: &str) -> cheikhei_core::Result<Vec<Token>> {
            let mut tokens = Vec::new();
            let mut offset = 0;
            for word in text.split_inclusive(char::is_whitespace) {
                let trimmed = word.trim_end();
                if !trimmed.is_empty() {
                    tokens.push(Token::new(
                        trimmed,
                        tokens.len() as u32,
                        offset,
                        offset + trimmed.len(),
                    ));
                }
                offset += word.len();
            }
            Ok(tokens)
        }
    }

    struct CheikheiModel;

    impl BoundaryModel for CheikheiModel {
        fn predict_boundaries(&self, tokens: &[Token]) -> cheikhei_core::Result<Vec<bool>> {
            Ok(tokens.iter().map(|t| t.piece.ends_with('꯫')).collect())
        }
    }

    fn loaded_state() -> AppState {
        let slot = ModelSlot::new();
        slot.publish(SentenceSplitter::new(
            Box::new(WordTokenizer),
            Box::new(CheikheiModel),
        ));
        AppState::new(Arc::new(slot))
    }

    fn unloaded_state() -> AppState {
        AppState::new(Arc::new(ModelSlot::new()))
    }

    async fn post_split(state: AppState, body: Value) -> (StatusCode, Value) {
        let app = create_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/split")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn split_returns_sentences_in_source_order() {
        let (status, body) = post_split(
            loaded_state(),
            json!({ "text": "ꯑꯩ ꯆꯥꯛ ꯆꯥꯔꯦ꯫ ꯅꯪ ꯀꯗꯥꯌ ꯆꯠꯂꯤ꯫" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "sentences": ["ꯑꯩ ꯆꯥꯛ ꯆꯥꯔꯦ꯫", "ꯅꯪ ꯀꯗꯥꯌ ꯆꯠꯂꯤ꯫"] })
        );
    }

    #[tokio::test]
    async fn empty_text_returns_empty_list_with_success() {
        let (status, body) = post_split(loaded_state(), json!({ "text": "" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "sentences": [] }));
    }

    #[tokio::test]
    async fn split_without_model_returns_service_unavailable() {
        let (status, body) = post_split(unloaded_state(), json!({ "text": "ꯑꯩ" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "Model is not loaded." }));
    }

    #[tokio::test]
    async fn health_reflects_unloaded_slot() {
        let app = create_router(unloaded_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok", "model_loaded": false }));
    }

    #[tokio::test]
    async fn health_reflects_loaded_slot() {
        let app = create_router(loaded_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok", "model_loaded": true }));
    }
}
