use async_trait::async_trait;
use tracing::debug;

use crate::{
    constants::APP_STORE_STATUS_VALID,
    data::{
        datasources::{
            app_store_verify_receipt_datasource::{
                AppStoreVerifyReceiptDatasource, AppStoreVerifyReceiptDatasourceImpl,
            },
            google_play_developer_api_datasource::{
                GooglePlayDeveloperApiDatasource, GooglePlayDeveloperApiDatasourceImpl,
                ServiceAccountTokenProvider,
            },
        },
        models::{
            app_store_verify_receipt::verify_receipt_response_model::VerifyReceiptResponseModel,
            google_play_developer_api::product_purchase_model as gp, raw::WithRaw,
        },
    },
    domain::{
        entities::purchase_verification_result::PurchaseVerificationResult,
        repositories::purchase_verification_repository::PurchaseVerificationRepository,
    },
    errors::IapError,
    secrets::IapSecretsConfig,
};

pub(crate) struct PurchaseVerificationRepositoryImpl<
    A: AppStoreVerifyReceiptDatasource,
    G: GooglePlayDeveloperApiDatasource,
> {
    app_store_verify_receipt_datasource: A,
    google_play_developer_api_datasource: G,
    android_package_name: String,
}

#[async_trait]
impl<A: AppStoreVerifyReceiptDatasource, G: GooglePlayDeveloperApiDatasource>
    PurchaseVerificationRepository for PurchaseVerificationRepositoryImpl<A, G>
{
    async fn verify_app_store_receipt(
        &self,
        receipt_data: &str,
        product_id: &str,
    ) -> Result<PurchaseVerificationResult, IapError> {
        let m = self
            .app_store_verify_receipt_datasource
            .verify_receipt(receipt_data)
            .await?;
        debug!(product_id, status = m.parsed.status, environment = ?m.parsed.environment);
        Ok(PurchaseVerificationResult::from_app_store_response(m))
    }

    async fn verify_google_play_purchase(
        &self,
        purchase_token: &str,
        product_id: &str,
    ) -> Result<PurchaseVerificationResult, IapError> {
        let m = self
            .google_play_developer_api_datasource
            .get_product_purchase(&self.android_package_name, product_id, purchase_token)
            .await?;
        debug!(
            product_id,
            purchase_state = ?m.parsed.purchase_state,
            order_id = ?m.parsed.order_id,
            purchase_time = ?m.parsed.purchase_time_millis
        );
        Ok(PurchaseVerificationResult::from_google_product_purchase(m))
    }
}

impl
    PurchaseVerificationRepositoryImpl<
        AppStoreVerifyReceiptDatasourceImpl,
        GooglePlayDeveloperApiDatasourceImpl<ServiceAccountTokenProvider>,
    >
{
    pub(crate) fn new(secrets: &IapSecretsConfig) -> Self {
        Self::from_datasources(
            AppStoreVerifyReceiptDatasourceImpl::new(secrets.app_store_shared_secret.clone()),
            GooglePlayDeveloperApiDatasourceImpl::new(secrets.google_service_account_key.clone()),
            secrets.android_package_name.clone(),
        )
    }
}

impl<A: AppStoreVerifyReceiptDatasource, G: GooglePlayDeveloperApiDatasource>
    PurchaseVerificationRepositoryImpl<A, G>
{
    pub(crate) fn from_datasources(
        app_store_verify_receipt_datasource: A,
        google_play_developer_api_datasource: G,
        android_package_name: String,
    ) -> Self {
        Self {
            app_store_verify_receipt_datasource,
            google_play_developer_api_datasource,
            android_package_name,
        }
    }
}

impl PurchaseVerificationResult {
    fn from_app_store_response(m: WithRaw<VerifyReceiptResponseModel>) -> Self {
        PurchaseVerificationResult::Ios {
            is_valid: m.parsed.status == APP_STORE_STATUS_VALID,
            // Taken from the raw value so the receipt is passed through
            // exactly as Apple sent it.
            receipt: m.raw.get("receipt").cloned(),
        }
    }

    fn from_google_product_purchase(m: WithRaw<gp::ProductPurchaseModel>) -> Self {
        PurchaseVerificationResult::Android {
            is_valid: m.parsed.purchase_state == gp::PurchaseState::Purchased,
            purchase_info: m.raw,
        }
    }
}
