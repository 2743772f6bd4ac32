//! Typed HTTP client for the product API

use crate::config::ClientConfig;
use crate::core::Product;
use axum::http::StatusCode;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a fetch from the product API failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// The detail endpoint answered 404 for `id`
    #[error("Product not found")]
    NotFound { id: i64 },

    #[error("request timed out")]
    Timeout,

    /// Connection refused, DNS failure, reset, bad base URL
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status other than a detail 404
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the expected `{ success, data }` envelope
    #[error("invalid response body: {0}")]
    Decode(String),

    /// 2xx response carrying `success: false`
    #[error("{message}")]
    Rejected { message: String },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            FetchError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            FetchError::Network(_) | FetchError::Decode(_) | FetchError::Rejected { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "PRODUCT_NOT_FOUND",
            FetchError::Timeout => "FETCH_TIMEOUT",
            FetchError::Network(_) => "FETCH_NETWORK_ERROR",
            FetchError::Status { .. } => "FETCH_STATUS_ERROR",
            FetchError::Decode(_) => "FETCH_DECODE_ERROR",
            FetchError::Rejected { .. } => "FETCH_REJECTED",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Wire envelope shared by every product endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Client for `/api/products`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from `config`, applying its request timeout
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            FetchError::Network(format!("invalid base URL '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Network(format!(
                "invalid base URL '{}'",
                config.api_base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /api/products
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_data(self.endpoint(&["api", "products"])).await
    }

    /// GET /api/products/{id}
    ///
    /// A 404 becomes [`FetchError::NotFound`], distinct from transport errors.
    pub async fn fetch_product(&self, id: i64) -> Result<Product, FetchError> {
        let id_segment = id.to_string();
        match self
            .get_data(self.endpoint(&["api", "products", &id_segment]))
            .await
        {
            Err(FetchError::Status { status: 404, .. }) => Err(FetchError::NotFound { id }),
            other => other,
        }
    }

    /// GET /api/products/search/{keyword}
    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, FetchError> {
        self.get_data(self.endpoint(&["api", "products", "search", keyword]))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(url = %url, "fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(FetchError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }
        envelope
            .data
            .ok_or_else(|| FetchError::Decode("response has no data".to_string()))
    }
}
