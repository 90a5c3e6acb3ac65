use thiserror::Error;

/// Failures while calling out to a vendor verification API.
///
/// These never leave the crate as-is: the dispatcher collapses every variant
/// into [`VerifyPurchaseError::Internal`], keeping only the message text.
#[derive(Debug, Error)]
pub enum IapError {
    #[error("Error calling out to App Store verifyReceipt ({endpoint}): {message}; {debug}")]
    AppStoreVerifyReceiptError {
        endpoint: String,
        message: &'static str,
        debug: String,
    },
    #[error("Invalid response from App Store verifyReceipt ({endpoint}): {debug}")]
    AppStoreVerifyReceiptInvalidResponse { endpoint: String, debug: String },

    #[error("Invalid Google Play Developer API credentials: {message}; {debug}")]
    GooglePlayDeveloperApiKeyInvalid {
        message: &'static str,
        debug: String,
    },
    #[error("Error calling out to Google Play Developer API ({function_name}): {message}; {debug}")]
    GooglePlayDeveloperApiError {
        function_name: &'static str,
        message: String,
        debug: String,
    },
    #[error("Invalid response from Google Play Developer API ({function_name}): {debug}")]
    GooglePlayDeveloperApiInvalidResponse {
        function_name: &'static str,
        debug: String,
    },
}

/// The only error shape visible to callers of
/// [`IapVerificationUtil::verify_purchase`](crate::util::IapVerificationUtil::verify_purchase).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyPurchaseError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Internal(String),
}

impl VerifyPurchaseError {
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyPurchaseError::InvalidArgument(_) => "invalid-argument",
            VerifyPurchaseError::Internal(_) => "internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            VerifyPurchaseError::InvalidArgument(message)
            | VerifyPurchaseError::Internal(message) => message,
        }
    }
}
