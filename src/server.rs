//! Callable-function HTTP surface.
//!
//! Requests arrive as `{"data": {...}}` and are answered with either
//! `{"result": {...}}` or `{"error": {"status": ..., "message": ...}}`, which
//! is the envelope mobile callable-function SDKs speak.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    domain::{
        entities::{
            purchase_verification_request::PurchaseVerificationRequest,
            purchase_verification_result::PurchaseVerificationResult,
        },
        repositories::purchase_verification_repository::PurchaseVerificationRepository,
    },
    errors::VerifyPurchaseError,
    secrets::IapSecretsConfig,
    util::IapVerificationUtil,
};

pub const VERIFY_PURCHASE_PATH: &str = "/verifyPurchase";

#[derive(Debug, Deserialize)]
struct CallableRequest {
    data: PurchaseVerificationRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CallableResponse {
    Result(PurchaseVerificationResult),
    Error(CallableError),
}

#[derive(Debug, Serialize)]
struct CallableError {
    status: &'static str,
    message: String,
}

impl IntoResponse for VerifyPurchaseError {
    fn into_response(self) -> Response {
        let (code, status) = match self {
            VerifyPurchaseError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT")
            }
            VerifyPurchaseError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };
        let body = CallableResponse::Error(CallableError {
            status,
            message: self.message().to_string(),
        });
        (code, Json(body)).into_response()
    }
}

pub fn router<R: PurchaseVerificationRepository + 'static>(
    util: Arc<IapVerificationUtil<R>>,
) -> Router {
    Router::new()
        .route(VERIFY_PURCHASE_PATH, post(handle_verify_purchase::<R>))
        .with_state(util)
}

/// Router backed by the live App Store and Google Play verifiers.
pub fn router_from_secrets(secrets: &IapSecretsConfig) -> Router {
    router(Arc::new(IapVerificationUtil::new(secrets)))
}

async fn handle_verify_purchase<R: PurchaseVerificationRepository + 'static>(
    State(util): State<Arc<IapVerificationUtil<R>>>,
    payload: Result<Json<CallableRequest>, JsonRejection>,
) -> Result<Json<CallableResponse>, VerifyPurchaseError> {
    let Json(CallableRequest { data }) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected malformed verifyPurchase call.");
        VerifyPurchaseError::InvalidArgument(format!("Bad request: {}", rejection.body_text()))
    })?;
    let result = util.verify_purchase(&data).await?;
    Ok(Json(CallableResponse::Result(result)))
}
