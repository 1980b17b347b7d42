pub use config::ProviderConfig;
pub use error::ResolutionError;
pub use record::LocationRecord;

mod config;
mod error;
mod record;
#[cfg(test)]
pub(crate) mod test_provider;

use crate::uri_tools::compose_lookup_uri;

use hyper::client::connect::Connect;
use hyper::client::{Client, HttpConnector};
use hyper::http::Uri;
use hyper::Body;
use hyper_tls::HttpsConnector;

/// Looks addresses and domains up against an ipapi-compatible HTTP provider.
///
/// Every call is independent: no retries, no caching and no timeout. Callers
/// that want a deadline wrap [Resolver::resolve] themselves.
pub struct Resolver<C = HttpsConnector<HttpConnector>> {
    client: Client<C>,
    provider: Uri,
}

impl Resolver {
    pub fn new(provider: Uri) -> Self {
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);
        Self::with_client(client, provider)
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.uri.clone())
    }
}

impl<C> Resolver<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    pub fn with_client(client: Client<C>, provider: Uri) -> Self {
        Self { client, provider }
    }

    pub fn provider(&self) -> &Uri {
        &self.provider
    }

    /// Endpoint for `query`; blank queries resolve the caller's own address.
    pub fn lookup_uri(&self, query: &str) -> Result<Uri, ResolutionError> {
        let query = query.trim();
        compose_lookup_uri(&self.provider, query)
            .map_err(|_| ResolutionError::invalid_query(query))
    }

    pub async fn resolve(&self, query: &str) -> Result<LocationRecord, ResolutionError> {
        let uri = self.lookup_uri(query)?;
        log::debug!(r#"looking up "{uri}""#);

        let response = self.client.get(uri).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;
        let text = String::from_utf8_lossy(&body).into_owned();

        if !status.is_success() {
            return Err(ResolutionError::NetworkError { status, body: text });
        }
        LocationRecord::from_payload(&text)
    }
}
