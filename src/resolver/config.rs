use crate::non_zero_duration::NonZeroDuration;

use hyper::http::Uri;
use lazy_static::lazy_static;
use serde::Deserialize;

lazy_static! {
    static ref IPAPI_URI: Uri = "https://ipapi.co".parse().unwrap();
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(
        default = "ProviderConfig::default_uri",
        alias = "url",
        with = "http_serde::uri"
    )]
    pub uri: Uri,
    /// Applied by the caller around each lookup, the resolver itself never gives up.
    #[serde(default)]
    pub timeout: Option<NonZeroDuration>,
    /// Abort in-flight lookups when a newer one starts.
    #[serde(default)]
    pub cancel_superseded: bool,
}

impl ProviderConfig {
    pub fn default_uri() -> Uri {
        IPAPI_URI.clone()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            timeout: None,
            cancel_superseded: false,
        }
    }
}
