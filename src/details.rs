use crate::backend::{ApiError, ScreenerApi};
use crate::chart::{ChartAdapter, ChartSpec};
use crate::types::StockDetails;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

const NA: &str = "N/A";
const NO_SUMMARY: &str = "No analysis summary available.";
const NONE_IDENTIFIED: &str = "None identified in recent results.";

/// Fully-populated details panel: header fields, narrative summary, the two
/// analysis lists, and the chart spec. All fallbacks are resolved here so
/// the frontend renders it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockDetailsView {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub summary: String,
    pub bullish_points: Vec<String>,
    pub bearish_points: Vec<String>,
    pub chart: ChartSpec,
}

/// Result of one open request. A request that was overtaken by a later
/// click reports Superseded and must not be rendered.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailsOutcome {
    Applied { view: StockDetailsView },
    Superseded,
}

struct Inner {
    current: Option<StockDetailsView>,
    chart: ChartAdapter,
}

/// Lifecycle of the details panel. Each open draws a monotonically
/// increasing token before fetching; a response is applied only while its
/// token is still the latest issued, so the last click always wins the
/// final render regardless of response arrival order. Failures and
/// superseded responses leave the previous state untouched.
pub struct DetailsSession {
    latest: AtomicU64,
    inner: Mutex<Inner>,
}

impl Default for DetailsSession {
    fn default() -> Self {
        Self {
            latest: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                current: None,
                chart: ChartAdapter::new(),
            }),
        }
    }
}

impl DetailsSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and render details for one ticker. The view is built in full
    /// (header, summary, lists, chart) and swapped in atomically; on fetch
    /// failure the session keeps whatever it was showing before.
    pub async fn open<A: ScreenerApi + ?Sized>(
        &self,
        api: &A,
        ticker: &str,
    ) -> Result<DetailsOutcome, ApiError> {
        let ticker = ticker.trim().to_uppercase();
        let token = self.begin();
        let details = api.stock_details(&ticker).await?;
        Ok(self.apply(token, details))
    }

    /// Hide the panel and release the chart. Safe to call when nothing is
    /// open.
    pub fn close(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.current = None;
            inner.chart.dispose();
        }
    }

    pub fn current(&self) -> Option<StockDetailsView> {
        self.inner.lock().ok().and_then(|inner| inner.current.clone())
    }

    pub fn chart_instances(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.chart.instance_count())
            .unwrap_or(0)
    }

    /// Issue the next request token and mark it as the latest.
    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a fetched record if its token is still the latest issued;
    /// otherwise discard it.
    fn apply(&self, token: u64, details: StockDetails) -> DetailsOutcome {
        let Ok(mut inner) = self.inner.lock() else {
            return DetailsOutcome::Superseded;
        };
        if token != self.latest.load(Ordering::SeqCst) {
            return DetailsOutcome::Superseded;
        }
        let chart = inner.chart.render(&details.price_history).spec.clone();
        let view = build_view(details, chart);
        inner.current = Some(view.clone());
        DetailsOutcome::Applied { view }
    }
}

fn build_view(details: StockDetails, chart: ChartSpec) -> StockDetailsView {
    let name = details
        .name
        .unwrap_or_else(|| format!("{} Details", details.ticker));
    StockDetailsView {
        ticker: details.ticker,
        name,
        sector: details.sector.unwrap_or_else(|| NA.to_string()),
        summary: details.gemini_summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
        bullish_points: points_or_placeholder(details.bullish_points),
        bearish_points: points_or_placeholder(details.bearish_points),
        chart,
    }
}

/// Each list independently falls back to the placeholder entry when empty.
fn points_or_placeholder(points: Vec<String>) -> Vec<String> {
    if points.is_empty() {
        vec![NONE_IDENTIFIED.to_string()]
    } else {
        points
    }
}
