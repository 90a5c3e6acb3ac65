use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

use crate::{
    constants::{GOOGLE_PLAY_DEVELOPER_API_BASE_URL, GOOGLE_PLAY_DEVELOPER_API_SCOPE},
    data::models::{
        google_play_developer_api::product_purchase_model::ProductPurchaseModel, raw::WithRaw,
    },
    errors::IapError,
};

#[async_trait]
pub(crate) trait GooglePlayDeveloperApiDatasource: Send + Sync {
    /// purchases.products.get:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/get
    ///
    /// packageName:
    ///   The package name of the application the inapp product was sold in (for
    ///   example, 'com.some.thing').
    /// productId:
    ///   The inapp product SKU (for example, 'com.some.thing.inapp1').
    /// token:
    ///   The token provided to the user's device when the inapp product was
    ///   purchased.
    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<WithRaw<ProductPurchaseModel>, IapError>;
}

/// Source of OAuth2 bearer tokens for the Play Developer API.
#[async_trait]
pub(crate) trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, IapError>;
}

/// Mints a token from a service account key.
///
/// A new authenticator is built for every call, so nothing is cached between
/// verifications.
pub(crate) struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
}

impl ServiceAccountTokenProvider {
    pub(crate) fn new(key: ServiceAccountKey) -> Self {
        Self { key }
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, IapError> {
        let authenticator = ServiceAccountAuthenticator::builder(self.key.clone())
            .build()
            .await
            .map_err(|e| {
                warn!(error = ?e, "Failed to build service account authenticator.");
                IapError::GooglePlayDeveloperApiKeyInvalid {
                    message: "Google Play API service account authenticator could not be built",
                    debug: e.to_string(),
                }
            })?;

        let scopes = &[GOOGLE_PLAY_DEVELOPER_API_SCOPE];
        Ok(authenticator
            .token(scopes)
            .await
            .map_err(|e| {
                warn!(error = ?e, "Failed to fetch service account token.");
                IapError::GooglePlayDeveloperApiKeyInvalid {
                    message: "Google Play API service account token could not be built",
                    debug: e.to_string(),
                }
            })?
            .token()
            .ok_or(IapError::GooglePlayDeveloperApiKeyInvalid {
                message: "Google Play API service account token is empty",
                debug: String::new(),
            })?
            .to_string())
    }
}

pub(crate) struct GooglePlayDeveloperApiDatasourceImpl<P: AccessTokenProvider> {
    client: reqwest::Client,
    token_provider: P,
    base_url: String,
}

#[async_trait]
impl<P: AccessTokenProvider> GooglePlayDeveloperApiDatasource
    for GooglePlayDeveloperApiDatasourceImpl<P>
{
    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<WithRaw<ProductPurchaseModel>, IapError> {
        let function_name = "purchases.products.get";
        let url = self.resource_url(
            function_name,
            &[
                "applications",
                package_name,
                "purchases",
                "products",
                product_id,
                "tokens",
                token,
            ],
        )?;
        self.callout(url, function_name).await
    }
}

impl GooglePlayDeveloperApiDatasourceImpl<ServiceAccountTokenProvider> {
    pub(crate) fn new(key: ServiceAccountKey) -> Self {
        Self::with_base_url(
            ServiceAccountTokenProvider::new(key),
            GOOGLE_PLAY_DEVELOPER_API_BASE_URL.to_string(),
        )
    }
}

impl<P: AccessTokenProvider> GooglePlayDeveloperApiDatasourceImpl<P> {
    pub(crate) fn with_base_url(token_provider: P, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_provider,
            base_url,
        }
    }

    /// Appends `segments` to the base URL, percent-encoding each one so that
    /// client-supplied ids can't add path segments, a query or a fragment.
    fn resource_url(
        &self,
        function_name: &'static str,
        segments: &[&str],
    ) -> Result<Url, IapError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(IapError::GooglePlayDeveloperApiError {
                function_name,
                message: "invalid path segment".to_string(),
                debug: segment.to_string(),
            });
        }
        let mut url =
            Url::parse(&self.base_url).map_err(|e| IapError::GooglePlayDeveloperApiError {
                function_name,
                message: "invalid base URL".to_string(),
                debug: e.to_string(),
            })?;
        url.path_segments_mut()
            .map_err(|_| IapError::GooglePlayDeveloperApiError {
                function_name,
                message: "base URL cannot have path segments".to_string(),
                debug: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn callout<T: DeserializeOwned>(
        &self,
        url: Url,
        function_name: &'static str,
    ) -> Result<WithRaw<T>, IapError> {
        let access_token = self.token_provider.access_token().await?;
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| {
                warn!(function_name, error = ?e, "Play Developer API callout failed to send.");
                IapError::GooglePlayDeveloperApiError {
                    function_name,
                    message: "callout failed to send".to_string(),
                    debug: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(function_name, %status, "Play Developer API returned with non-200 status code.");
            return Err(IapError::GooglePlayDeveloperApiError {
                function_name,
                message: format!("callout returned with {} status code", status),
                debug: response.text().await.unwrap_or_default(),
            });
        }

        let raw: Value = response.json().await.map_err(|e| {
            warn!(function_name, error = ?e, "Failed to read Play Developer API response.");
            IapError::GooglePlayDeveloperApiInvalidResponse {
                function_name,
                debug: e.to_string(),
            }
        })?;
        WithRaw::from_value(raw).map_err(|e| {
            warn!(function_name, error = ?e, "Failed to parse Play Developer API response.");
            IapError::GooglePlayDeveloperApiInvalidResponse {
                function_name,
                debug: e.to_string(),
            }
        })
    }
}
