use crate::record::PriceRecord;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const PRICE_ENDPOINT: &str = "https://emeditor-get-price.emeditor.com/";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid price endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[allow(dead_code)]
    #[error("price source unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can produce a price record.
///
/// `Ok(None)` is the ordinary "no usable data" result. `Err` is reserved for
/// faults the source could not turn into absence; callers suppress it.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self) -> Result<Option<PriceRecord>, FetchError>;
}

/// Fetches prices with a single GET against a fixed endpoint.
#[derive(Clone)]
pub struct HttpPriceFetcher {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpPriceFetcher {
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|source| FetchError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PriceSource for HttpPriceFetcher {
    async fn fetch_price(&self) -> Result<Option<PriceRecord>, FetchError> {
        let resp = match self.client.get(self.endpoint.clone()).send().await {
            Ok(resp) => resp,
            Err(err) => {
                debug!(endpoint = %self.endpoint, %err, "price request failed");
                return Ok(None);
            }
        };
        let status = resp.status();
        if !status.is_success() {
            debug!(endpoint = %self.endpoint, %status, "price endpoint returned error status");
            return Ok(None);
        }
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(err) => {
                debug!(endpoint = %self.endpoint, %err, "reading price body failed");
                return Ok(None);
            }
        };
        let record = PriceRecord::from_slice(&body);
        if record.is_none() {
            debug!(
                endpoint = %self.endpoint,
                len = body.len(),
                "price body is not a json object or array"
            );
        }
        Ok(record)
    }
}
