use async_trait::async_trait;

use crate::{
    domain::entities::purchase_verification_result::PurchaseVerificationResult,
    errors::IapError,
};

/// One verifier per store. Implementations make the vendor round-trip and
/// judge validity; they never turn a vendor rejection into an error.
#[async_trait]
pub trait PurchaseVerificationRepository: Send + Sync {
    /// Verifies a base64 app receipt with the App Store.
    async fn verify_app_store_receipt(
        &self,
        receipt_data: &str,
        product_id: &str,
    ) -> Result<PurchaseVerificationResult, IapError>;

    /// Looks up a one-time product purchase with Google Play.
    async fn verify_google_play_purchase(
        &self,
        purchase_token: &str,
        product_id: &str,
    ) -> Result<PurchaseVerificationResult, IapError>;
}
