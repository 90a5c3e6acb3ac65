use serde::{Deserialize, Serialize};

/// Purchase assertion sent by the client app.
///
/// `platform` stays a plain string so that unrecognized values can be
/// reported as an invalid argument instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseVerificationRequest {
    #[serde(default)]
    pub platform: String,
    /// Base64 app receipt (iOS) or purchase token (Android).
    #[serde(default)]
    pub receipt_data: String,
    #[serde(default)]
    pub product_id: String,
    /// Purchase signature reported by Google Play Billing. Android only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
