use serde::Serialize;
use serde_json::Value;

/// Normalized verification outcome.
///
/// `is_valid == false` means the vendor looked at the purchase and rejected
/// it. Failing to reach the vendor at all is an error, not a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum PurchaseVerificationResult {
    Ios {
        is_valid: bool,
        /// Receipt object exactly as returned by verifyReceipt. Absent when
        /// Apple could not decode the receipt.
        #[serde(skip_serializing_if = "Option::is_none")]
        receipt: Option<Value>,
    },
    Android {
        is_valid: bool,
        /// ProductPurchase resource exactly as returned by Google.
        purchase_info: Value,
    },
}

impl PurchaseVerificationResult {
    pub fn is_valid(&self) -> bool {
        match self {
            PurchaseVerificationResult::Ios { is_valid, .. }
            | PurchaseVerificationResult::Android { is_valid, .. } => *is_valid,
        }
    }
}
