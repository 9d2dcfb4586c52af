//! HTTP client for the urban data platform datasets.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use tokio::time::timeout;

use crate::error::Error;
use crate::models::{DisabledParking, Garage, ParkAndRide};

/// Default base URL of the urban data platform datasets API.
pub const DEFAULT_BASE_URL: &str = "https://api.hamburg.de/datasets/v1";

/// Content type the API uses for feature collections.
const GEO_JSON: &str = "application/geo+json";

const USER_AGENT_VALUE: &str = concat!("hamburg-urban-data/", env!("CARGO_PKG_VERSION"));

const TIMEOUT_MESSAGE: &str = "Timeout occurred while connecting to the API.";
const COMMUNICATION_MESSAGE: &str = "Error occurred while communicating with the API.";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct UrbanDataClientConfig {
    /// Base URL of the datasets API. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Timeout for one request/response cycle. Defaults to 10 seconds.
    pub request_timeout: Duration,
}

impl Default for UrbanDataClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Query options shared by the dataset operations.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of features the server returns. Defaults to 10.
    pub limit: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Query options for the garage dataset.
#[derive(Debug, Clone)]
pub struct GarageQueryOptions {
    /// Maximum number of features the server returns. Defaults to 10.
    pub limit: u32,
    /// Server-side filter expression, for example `frei>=0`, forwarded
    /// verbatim as the `filter` query parameter.
    pub filter: Option<String>,
}

impl Default for GarageQueryOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            filter: None,
        }
    }
}

/// Asynchronous client for the parking datasets of the urban data
/// platform of Hamburg.
///
/// Every operation performs exactly one GET request and returns a fully
/// materialized list of records. The client never retries and keeps no
/// state across calls beyond the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct UrbanDataClient {
    http: reqwest::Client,
    config: UrbanDataClientConfig,
}

impl UrbanDataClient {
    /// Create a client that owns its HTTP connection pool. The pool is
    /// released when the last clone of the client is dropped.
    #[must_use]
    pub fn new(config: UrbanDataClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client on top of a caller-supplied connection pool.
    ///
    /// The pool stays owned by the caller: `reqwest` clients share
    /// their pool across clones, so dropping this client never tears
    /// down the caller's connections.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: UrbanDataClientConfig) -> Self {
        Self { http, config }
    }

    /// Fetch disabled parking spots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] on timeout, transport failure, or
    /// an HTTP error status, [`Error::Protocol`] on an unexpected
    /// content type, and [`Error::Mapping`] when a feature cannot be
    /// mapped onto a record.
    pub async fn disabled_parkings(
        &self,
        options: &QueryOptions,
    ) -> Result<Vec<DisabledParking>, Error> {
        let collection = self
            .request(
                "behindertenstellplaetze/collections/verkehr_behindertenparkpl/items",
                &[("limit", options.limit.to_string())],
            )
            .await?;
        features(&collection)?
            .iter()
            .map(DisabledParking::from_feature)
            .collect()
    }

    /// Fetch park and ride facilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] on timeout, transport failure, or
    /// an HTTP error status, [`Error::Protocol`] on an unexpected
    /// content type, and [`Error::Mapping`] when a feature cannot be
    /// mapped onto a record.
    pub async fn park_and_rides(&self, options: &QueryOptions) -> Result<Vec<ParkAndRide>, Error> {
        let collection = self
            .request(
                "p_und_r/collections/p_und_r/items",
                &[("limit", options.limit.to_string())],
            )
            .await?;
        features(&collection)?
            .iter()
            .map(ParkAndRide::from_feature)
            .collect()
    }

    /// Fetch garages. Features without location coordinates are
    /// excluded by contract, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] on timeout, transport failure, or
    /// an HTTP error status, [`Error::Protocol`] on an unexpected
    /// content type, and [`Error::Mapping`] when a feature cannot be
    /// mapped onto a record.
    pub async fn garages(&self, options: &GarageQueryOptions) -> Result<Vec<Garage>, Error> {
        let mut params = vec![("limit", options.limit.to_string())];
        if let Some(filter) = &options.filter {
            params.push(("filter", filter.clone()));
        }
        let collection = self
            .request("parkhaeuser/collections/verkehr_parkhaeuser/items", &params)
            .await?;
        features(&collection)?
            .iter()
            .filter(|feature| feature.get("geometry").is_some_and(|g| !g.is_null()))
            .map(Garage::from_feature)
            .collect()
    }

    /// Perform one GET request against the datasets API and decode the
    /// body as JSON.
    async fn request(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, Error> {
        let url = format!("{}/{resource}", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(url, "GET feature collection");

        let send = self
            .http
            .get(&url)
            .query(params)
            .header(ACCEPT, GEO_JSON)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send();

        let response = timeout(self.config.request_timeout, send)
            .await
            .map_err(|_| Error::Connection(TIMEOUT_MESSAGE.to_string()))?
            .map_err(|e| {
                tracing::debug!(error = %e, "transport failure");
                Error::Connection(COMMUNICATION_MESSAGE.to_string())
            })?;

        // The status is checked before the content type, so HTTP error
        // statuses surface as connection errors.
        let response = response
            .error_for_status()
            .map_err(|e| {
                tracing::debug!(error = %e, "error status");
                Error::Connection(COMMUNICATION_MESSAGE.to_string())
            })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.contains(GEO_JSON) {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Protocol { content_type, body });
        }

        response
            .json()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "body decode failure");
                Error::Connection(COMMUNICATION_MESSAGE.to_string())
            })
    }
}

fn features(collection: &Value) -> Result<&Vec<Value>, Error> {
    collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Mapping("features".to_string()))
}
