use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    constants::{
        APP_STORE_STATUS_SANDBOX_RECEIPT, APP_STORE_VERIFY_RECEIPT_PRODUCTION_URL,
        APP_STORE_VERIFY_RECEIPT_SANDBOX_URL,
    },
    data::models::{
        app_store_verify_receipt::{
            verify_receipt_request_model::VerifyReceiptRequestModel,
            verify_receipt_response_model::VerifyReceiptResponseModel,
        },
        raw::WithRaw,
    },
    errors::IapError,
};

#[async_trait]
pub(crate) trait AppStoreVerifyReceiptDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receiptData:
    ///   The Base64-encoded receipt data, as read from the device.
    ///
    /// The returned status is not interpreted, except for the sandbox receipt
    /// status which triggers a retry against the sandbox environment.
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<WithRaw<VerifyReceiptResponseModel>, IapError>;
}

pub(crate) struct AppStoreVerifyReceiptDatasourceImpl {
    client: reqwest::Client,
    shared_secret: String,
    production_url: String,
    sandbox_url: String,
}

#[async_trait]
impl AppStoreVerifyReceiptDatasource for AppStoreVerifyReceiptDatasourceImpl {
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<WithRaw<VerifyReceiptResponseModel>, IapError> {
        let body = VerifyReceiptRequestModel {
            receipt_data,
            password: &self.shared_secret,
        };
        self.callout_with_sandbox_fallback(&body).await
    }
}

impl AppStoreVerifyReceiptDatasourceImpl {
    pub(crate) fn new(shared_secret: String) -> Self {
        Self::with_endpoints(
            shared_secret,
            APP_STORE_VERIFY_RECEIPT_PRODUCTION_URL.to_string(),
            APP_STORE_VERIFY_RECEIPT_SANDBOX_URL.to_string(),
        )
    }

    pub(crate) fn with_endpoints(
        shared_secret: String,
        production_url: String,
        sandbox_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            shared_secret,
            production_url,
            sandbox_url,
        }
    }

    async fn callout_with_sandbox_fallback(
        &self,
        body: &VerifyReceiptRequestModel<'_>,
    ) -> Result<WithRaw<VerifyReceiptResponseModel>, IapError> {
        // As per Apple's documentation, always verify against production
        // first. A sandbox receipt is reported with a dedicated status, in
        // which case the same request is repeated once against the sandbox.
        let production_response = self.callout(&self.production_url, body).await?;
        if production_response.parsed.status != APP_STORE_STATUS_SANDBOX_RECEIPT {
            return Ok(production_response);
        }
        debug!(
            sandbox_url = %self.sandbox_url,
            "Receipt belongs to the sandbox environment, retrying against sandbox."
        );
        self.callout(&self.sandbox_url, body).await
    }

    async fn callout(
        &self,
        url: &str,
        body: &VerifyReceiptRequestModel<'_>,
    ) -> Result<WithRaw<VerifyReceiptResponseModel>, IapError> {
        let response = self.client.post(url).json(body).send().await.map_err(|e| {
            warn!(endpoint = url, error = ?e, "verifyReceipt callout failed to send.");
            IapError::AppStoreVerifyReceiptError {
                endpoint: url.to_string(),
                message: "Callout failed to send.",
                debug: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(endpoint = url, %status, "verifyReceipt returned with non-200 status code.");
            return Err(IapError::AppStoreVerifyReceiptError {
                endpoint: url.to_string(),
                message: "Callout returned with non-200 status code.",
                debug: format!("{}; {}", status, text),
            });
        }

        let raw: Value = response.json().await.map_err(|e| {
            warn!(endpoint = url, error = ?e, "Failed to read verifyReceipt response.");
            IapError::AppStoreVerifyReceiptInvalidResponse {
                endpoint: url.to_string(),
                debug: e.to_string(),
            }
        })?;
        WithRaw::from_value(raw).map_err(|e| {
            warn!(endpoint = url, error = ?e, "Failed to parse verifyReceipt response.");
            IapError::AppStoreVerifyReceiptInvalidResponse {
                endpoint: url.to_string(),
                debug: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn datasource(server: &MockServer) -> AppStoreVerifyReceiptDatasourceImpl {
        AppStoreVerifyReceiptDatasourceImpl::with_endpoints(
            "shared-secret".to_string(),
            format!("{}/production/verifyReceipt", server.uri()),
            format!("{}/sandbox/verifyReceipt", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_valid_production_receipt_is_returned_without_sandbox_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .and(body_json(json!({
                "receipt-data": "MIIT...",
                "password": "shared-secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "environment": "Production",
                "receipt": {"bundle_id": "com.some.thing"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sandbox/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = datasource(&server).verify_receipt("MIIT...").await.unwrap();
        assert_eq!(response.parsed.status, 0);
        assert_eq!(response.raw["receipt"]["bundle_id"], "com.some.thing");
    }

    #[tokio::test]
    async fn test_sandbox_status_retries_once_against_sandbox() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 21007})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sandbox/verifyReceipt"))
            .and(body_json(json!({
                "receipt-data": "MIIT...",
                "password": "shared-secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "environment": "Sandbox",
                "receipt": {"receipt_type": "ProductionSandbox"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = datasource(&server).verify_receipt("MIIT...").await.unwrap();
        assert_eq!(response.parsed.status, 0);
        assert_eq!(response.raw["receipt"]["receipt_type"], "ProductionSandbox");
    }

    #[tokio::test]
    async fn test_other_error_status_is_returned_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 21002})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sandbox/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = datasource(&server).verify_receipt("garbage").await.unwrap();
        assert_eq!(response.parsed.status, 21002);
        assert!(response.raw.get("receipt").is_none());
    }

    #[tokio::test]
    async fn test_sandbox_status_from_sandbox_is_not_retried_again() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 21007})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sandbox/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 21007})))
            .expect(1)
            .mount(&server)
            .await;

        let response = datasource(&server).verify_receipt("MIIT...").await.unwrap();
        assert_eq!(response.parsed.status, 21007);
    }

    #[tokio::test]
    async fn test_http_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let e = datasource(&server).verify_receipt("MIIT...").await.unwrap_err();
        assert!(matches!(e, IapError::AppStoreVerifyReceiptError { .. }));
        assert!(e.to_string().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_unparseable_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production/verifyReceipt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"receipt": {}})))
            .mount(&server)
            .await;

        let e = datasource(&server).verify_receipt("MIIT...").await.unwrap_err();
        assert!(matches!(
            e,
            IapError::AppStoreVerifyReceiptInvalidResponse { .. }
        ));
    }
}
