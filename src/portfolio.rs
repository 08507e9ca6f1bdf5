use crate::backend::{ApiError, ScreenerApi};
use crate::form::{self, HoldingForm};
use crate::types::PortfolioHolding;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const NA: &str = "N/A";
const NO_HOLDINGS: &str = "No holdings in portfolio.";
const MSG_ADDED: &str = "Holding added successfully!";
const MSG_DELETED: &str = "Holding deleted successfully!";

/// Latest screening score below which a holding gets the sell hint.
/// Strictly below: a score of exactly -1 is not flagged.
const SELL_SCORE_THRESHOLD: f64 = -1.0;

/// Failures of a portfolio operation, kept apart so validation problems
/// read differently from backend ones.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Caught client-side; the backend was never contacted.
    Validation(String),
    /// The backend rejected the request or was unreachable.
    Api(ApiError),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::Validation(msg) => write!(f, "{msg}"),
            PortfolioError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PortfolioError {}

impl From<ApiError> for PortfolioError {
    fn from(err: ApiError) -> Self {
        PortfolioError::Api(err)
    }
}

/// Gain/loss percentage relative to the purchase price. Defined only when
/// the latest price is present and the purchase price is positive.
pub fn gain_loss_pct(purchase_price: f64, latest_price: Option<f64>) -> Option<f64> {
    let latest = latest_price?;
    if purchase_price > 0.0 {
        Some((latest - purchase_price) / purchase_price * 100.0)
    } else {
        None
    }
}

/// Whether the holding should carry the sell hint.
pub fn sell_suggested(latest_score: Option<f64>) -> bool {
    matches!(latest_score, Some(score) if score < SELL_SCORE_THRESHOLD)
}

/// One holdings-table row with derived metrics resolved for display. The
/// gain/loss class is "positive" or "negative" by sign, or absent when the
/// percentage is not available; the id is the delete-action key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    pub id: i64,
    pub ticker: String,
    pub name: String,
    pub quantity: i64,
    pub purchase_price: String,
    pub purchase_date: String,
    pub latest_price: String,
    pub latest_score: String,
    pub gain_loss: String,
    pub gain_loss_class: Option<String>,
    pub sell_suggested: bool,
}

/// Full replacement payload for the holdings table.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioTable {
    pub rows: Vec<HoldingRow>,
    pub placeholder: Option<String>,
}

/// Cached holdings collection. The cache is replaced whole on refresh and
/// is only ever invalidated through refresh/add/remove; mutations round-trip
/// through the backend before the collection changes.
#[derive(Default)]
pub struct PortfolioStore {
    holdings: Mutex<Vec<PortfolioHolding>>,
    refreshing: AtomicBool,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the holdings and replace the cached collection atomically.
    /// Overlapping calls are serialized: a refresh issued while another is
    /// in flight returns immediately without a second backend request.
    pub async fn refresh<A: ScreenerApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("portfolio refresh already in flight, skipping");
            return Ok(());
        }
        let result = api.portfolio().await;
        self.refreshing.store(false, Ordering::SeqCst);

        let holdings = result?;
        if let Ok(mut guard) = self.holdings.lock() {
            *guard = holdings;
        }
        Ok(())
    }

    /// Render the cached collection as table rows.
    pub fn table(&self) -> PortfolioTable {
        let snapshot = self
            .holdings
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        if snapshot.is_empty() {
            return PortfolioTable {
                rows: Vec::new(),
                placeholder: Some(NO_HOLDINGS.to_string()),
            };
        }
        PortfolioTable {
            rows: snapshot.iter().map(build_row).collect(),
            placeholder: None,
        }
    }

    /// Validate and submit a new holding. Validation failures never reach
    /// the backend; on success the collection is refetched and the success
    /// message returned (the backend's own when it sent one).
    pub async fn add<A: ScreenerApi + ?Sized>(
        &self,
        api: &A,
        form: &HoldingForm,
    ) -> Result<String, PortfolioError> {
        let holding = form::validate(form).map_err(PortfolioError::Validation)?;
        let ack = api.add_holding(&holding).await?;

        // The add itself succeeded; a failed refetch surfaces through the
        // table's own load path.
        if let Err(err) = self.refresh(api).await {
            warn!("portfolio refresh after add failed: {err}");
        }
        Ok(ack.message.unwrap_or_else(|| MSG_ADDED.to_string()))
    }

    /// Confirmation text for deleting a holding, naming its ticker and id.
    /// None when the id is not in the cached collection.
    pub fn delete_prompt(&self, id: i64) -> Option<String> {
        let guard = self.holdings.lock().ok()?;
        guard.iter().find(|h| h.id == id).map(|h| {
            format!(
                "Are you sure you want to delete the holding for {} (ID: {})?",
                h.ticker, id
            )
        })
    }

    /// Delete a holding by id. On failure the cached collection is left
    /// untouched; on success it is refetched.
    pub async fn remove<A: ScreenerApi + ?Sized>(
        &self,
        api: &A,
        id: i64,
    ) -> Result<String, PortfolioError> {
        let ack = api.delete_holding(id).await?;

        if let Err(err) = self.refresh(api).await {
            warn!("portfolio refresh after delete failed: {err}");
        }
        Ok(ack.message.unwrap_or_else(|| MSG_DELETED.to_string()))
    }
}

fn build_row(holding: &PortfolioHolding) -> HoldingRow {
    let pct = gain_loss_pct(holding.purchase_price, holding.latest_price);
    HoldingRow {
        id: holding.id,
        ticker: holding.ticker.clone(),
        name: holding.name.clone().unwrap_or_else(|| NA.to_string()),
        quantity: holding.quantity,
        purchase_price: format!("${:.2}", holding.purchase_price),
        purchase_date: holding.purchase_date.clone(),
        latest_price: holding
            .latest_price
            .map(|p| format!("${p:.2}"))
            .unwrap_or_else(|| NA.to_string()),
        latest_score: holding
            .latest_score
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| NA.to_string()),
        gain_loss: pct
            .map(|p| format!("{p:.2}%"))
            .unwrap_or_else(|| NA.to_string()),
        gain_loss_class: pct.map(|p| {
            if p >= 0.0 {
                "positive".to_string()
            } else {
                "negative".to_string()
            }
        }),
        sell_suggested: sell_suggested(holding.latest_score),
    }
}
