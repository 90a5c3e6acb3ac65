use tracing::{error, info};

use crate::{
    data::{
        datasources::{
            app_store_verify_receipt_datasource::AppStoreVerifyReceiptDatasourceImpl,
            google_play_developer_api_datasource::{
                GooglePlayDeveloperApiDatasourceImpl, ServiceAccountTokenProvider,
            },
        },
        repositories::purchase_verification_repository_impl::PurchaseVerificationRepositoryImpl,
    },
    domain::{
        entities::{
            platform::Platform, purchase_verification_request::PurchaseVerificationRequest,
            purchase_verification_result::PurchaseVerificationResult,
        },
        repositories::purchase_verification_repository::PurchaseVerificationRepository,
    },
    errors::VerifyPurchaseError,
    secrets::IapSecretsConfig,
};

pub struct IapVerificationUtil<R: PurchaseVerificationRepository> {
    purchase_verification_repository: R,
}

impl<R: PurchaseVerificationRepository> IapVerificationUtil<R> {
    pub fn from_repository(purchase_verification_repository: R) -> Self {
        Self {
            purchase_verification_repository,
        }
    }

    /// Routes the request to the store it came from and reports whether the
    /// store considers the purchase valid.
    ///
    /// A store rejection is an `Ok` result with `is_valid == false`. Errors
    /// mean verification could not be performed: `InvalidArgument` for an
    /// unrecognized platform (no store is contacted), `Internal` for anything
    /// that went wrong talking to the store.
    pub async fn verify_purchase(
        &self,
        request: &PurchaseVerificationRequest,
    ) -> Result<PurchaseVerificationResult, VerifyPurchaseError> {
        info!(
            platform = %request.platform,
            product_id = %request.product_id,
            has_receipt_data = !request.receipt_data.is_empty(),
            has_signature = request.signature.as_deref().is_some_and(|s| !s.is_empty()),
            "Starting purchase verification."
        );

        let platform: Platform = request.platform.parse().map_err(|_| {
            error!(platform = %request.platform, "Purchase verification failed: unsupported platform.");
            VerifyPurchaseError::InvalidArgument("Unsupported platform.".to_string())
        })?;

        let result = match platform {
            Platform::Ios => {
                self.purchase_verification_repository
                    .verify_app_store_receipt(&request.receipt_data, &request.product_id)
                    .await
            }
            Platform::Android => {
                self.purchase_verification_repository
                    .verify_google_play_purchase(&request.receipt_data, &request.product_id)
                    .await
            }
        };

        match result {
            Ok(result) => {
                info!(%platform, result = ?result, "Purchase verification completed.");
                Ok(result)
            }
            Err(e) => {
                error!(%platform, error = ?e, "Purchase verification failed.");
                Err(VerifyPurchaseError::Internal(format!(
                    "Purchase verification failed: {}",
                    e
                )))
            }
        }
    }
}

impl
    IapVerificationUtil<
        PurchaseVerificationRepositoryImpl<
            AppStoreVerifyReceiptDatasourceImpl,
            GooglePlayDeveloperApiDatasourceImpl<ServiceAccountTokenProvider>,
        >,
    >
{
    pub(crate) fn new(secrets: &IapSecretsConfig) -> Self {
        Self::from_repository(PurchaseVerificationRepositoryImpl::new(secrets))
    }
}
