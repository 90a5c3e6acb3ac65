pub(crate) const APP_STORE_VERIFY_RECEIPT_PRODUCTION_URL: &str =
    "https://buy.itunes.apple.com/verifyReceipt";
pub(crate) const APP_STORE_VERIFY_RECEIPT_SANDBOX_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

/// The receipt is valid.
pub(crate) const APP_STORE_STATUS_VALID: i32 = 0;
/// This receipt is from the test environment, but it was sent to the
/// production environment for verification.
pub(crate) const APP_STORE_STATUS_SANDBOX_RECEIPT: i32 = 21007;

pub(crate) const GOOGLE_PLAY_DEVELOPER_API_BASE_URL: &str =
    "https://androidpublisher.googleapis.com/androidpublisher/v3";
pub(crate) const GOOGLE_PLAY_DEVELOPER_API_SCOPE: &str =
    "https://www.googleapis.com/auth/androidpublisher";
