use std::fmt;

use yup_oauth2::ServiceAccountKey;

/// Vendor credentials and app identifiers, loaded once at process start and
/// shared read-only by every verification.
#[derive(Clone)]
pub struct IapSecretsConfig {
    /// App-specific shared secret sent as `password` to verifyReceipt.
    pub app_store_shared_secret: String,
    /// Package name of the Android app, e.g. 'com.some.thing'.
    pub android_package_name: String,
    /// Service account with access to the Play Developer API.
    pub google_service_account_key: ServiceAccountKey,
}

impl fmt::Debug for IapSecretsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IapSecretsConfig")
            .field("app_store_shared_secret", &"<redacted>")
            .field("android_package_name", &self.android_package_name)
            .field(
                "google_service_account_key",
                &format_args!("<{}>", self.google_service_account_key.client_email),
            )
            .finish()
    }
}
