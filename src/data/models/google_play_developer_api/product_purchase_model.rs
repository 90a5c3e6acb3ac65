use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_repr::Deserialize_repr;
use serde_with::{formats::Flexible, serde_as, TimestampMilliSeconds};

/// Data structure returned by the Google Play Developer API when querying for a
/// product purchase.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products#ProductPurchase
///
/// Only the fields this crate reads are modelled. The full resource is passed
/// through untouched, so unknown or newly added fields never fail the parse.
/// The API encodes int64 values as strings.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductPurchaseModel {
    /// The time the product was purchased, in milliseconds since the epoch (Jan
    /// 1, 1970).
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) purchase_time_millis: Option<DateTime<Utc>>,
    /// The purchase state of the order.
    pub(crate) purchase_state: PurchaseState,
    /// The order id associated with the purchase of the inapp product.
    pub(crate) order_id: Option<String>,
}

#[derive(Debug, Deserialize_repr, PartialEq)]
#[repr(u8)]
pub(crate) enum PurchaseState {
    Purchased = 0,
    Canceled = 1,
    Pending = 2,
}
