use crate::types::{ErrorBody, MutationAck, NewHolding, PortfolioHolding, Stock, StockDetails};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::fmt;

/// Failures crossing the backend boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network or decode failure before a usable response was obtained.
    Transport(String),
    /// Non-success HTTP status, carrying the backend's error message when
    /// the body supplied one.
    Request {
        status: u16,
        message: Option<String>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "{msg}"),
            ApiError::Request {
                status,
                message: Some(msg),
            } => write!(f, "{msg} (status {status})"),
            ApiError::Request {
                status,
                message: None,
            } => write!(f, "HTTP error! status: {status}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The screener backend as the dashboard sees it. Stores and views talk to
/// this trait only, so tests can substitute a scripted fake.
#[async_trait]
pub trait ScreenerApi: Send + Sync {
    async fn highlighted_stocks(&self) -> Result<Vec<Stock>, ApiError>;
    async fn stock_details(&self, ticker: &str) -> Result<StockDetails, ApiError>;
    async fn portfolio(&self) -> Result<Vec<PortfolioHolding>, ApiError>;
    async fn add_holding(&self, holding: &NewHolding) -> Result<MutationAck, ApiError>;
    async fn delete_holding(&self, id: i64) -> Result<MutationAck, ApiError>;
}

/// reqwest-backed client for the live backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request to {path} failed: {e}")))?;
        decode(resp).await
    }
}

/// Turn a response into a decoded body or the matching ApiError. A
/// non-success status reads the `{error}` body when it can; a body the
/// backend never sent (or sent malformed) just means no message.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        return Err(ApiError::Request {
            status: status.as_u16(),
            message,
        });
    }
    resp.json()
        .await
        .map_err(|e| ApiError::Transport(format!("Failed to decode response: {e}")))
}

#[async_trait]
impl ScreenerApi for HttpBackend {
    async fn highlighted_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.get_json("/api/highlighted-stocks").await
    }

    async fn stock_details(&self, ticker: &str) -> Result<StockDetails, ApiError> {
        self.get_json(&format!("/api/stock-details/{ticker}")).await
    }

    async fn portfolio(&self) -> Result<Vec<PortfolioHolding>, ApiError> {
        self.get_json("/api/portfolio").await
    }

    async fn add_holding(&self, holding: &NewHolding) -> Result<MutationAck, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/portfolio"))
            .json(holding)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Add-holding request failed: {e}")))?;
        decode(resp).await
    }

    async fn delete_holding(&self, id: i64) -> Result<MutationAck, ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/portfolio/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Delete-holding request failed: {e}")))?;
        decode(resp).await
    }
}
