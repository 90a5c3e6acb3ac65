use serde::de::DeserializeOwned;
use serde_json::Value;

/// A vendor response parsed into its typed model, together with the JSON it
/// was parsed from.
///
/// The typed model is used for decisions, while the raw value is what gets
/// handed back to callers, so fields the model doesn't know about survive.
#[derive(Debug, Clone)]
pub(crate) struct WithRaw<T> {
    pub(crate) parsed: T,
    pub(crate) raw: Value,
}

impl<T: DeserializeOwned> WithRaw<T> {
    pub(crate) fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            parsed: T::deserialize(&raw)?,
            raw,
        })
    }
}
