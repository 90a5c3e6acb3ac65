use serde::Deserialize;

/// Data structure returned by verifyReceipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Only `status` is guaranteed to be present. The receipt itself is read
/// from the raw response so it is passed through exactly as Apple sent it.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error. The status code reflects the status of the app receipt as a
    /// whole.
    pub(crate) status: i32,
    /// The environment for which the receipt was generated.
    pub(crate) environment: Option<Environment>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub(crate) enum Environment {
    Sandbox,
    Production,

    #[serde(untagged)]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_error_status_without_receipt() {
        let m: VerifyReceiptResponseModel =
            serde_json::from_value(json!({"status": 21002})).unwrap();
        assert_eq!(m.status, 21002);
        assert!(m.environment.is_none());
    }

    #[test]
    fn test_parse_valid_receipt() {
        let m: VerifyReceiptResponseModel = serde_json::from_value(json!({
            "status": 0,
            "environment": "Sandbox",
            "receipt": {"bundle_id": "com.some.thing", "in_app": []},
            "is-retryable": false
        }))
        .unwrap();
        assert_eq!(m.status, 0);
        assert_eq!(m.environment, Some(Environment::Sandbox));
    }

    #[test]
    fn test_unrecognized_environment_is_kept() {
        let m: VerifyReceiptResponseModel =
            serde_json::from_value(json!({"status": 0, "environment": "Xcode"})).unwrap();
        assert_eq!(m.environment, Some(Environment::Unknown("Xcode".to_string())));
    }
}
