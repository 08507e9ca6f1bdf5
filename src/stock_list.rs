use crate::backend::{ApiError, ScreenerApi};
use crate::filter_sort::{filter_and_sort, SortKey};
use crate::types::Stock;
use serde::Serialize;
use std::sync::Mutex;

const NA: &str = "N/A";
const NO_MATCHES: &str = "No stocks match the current filters.";

/// One stock rendered as a card. Every numeric field is pre-formatted to
/// two decimals; absent values render as "N/A", never as zero. The ticker
/// doubles as the card's interaction key for the details click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCard {
    pub ticker: String,
    pub title: String,
    pub sector: String,
    pub score: String,
    pub price_change_pct: String,
    pub volume_ratio: String,
    pub pe_ratio: String,
    pub dividend_yield_pct: String,
    pub avg_sentiment: String,
    pub price_vs_ma50: String,
    pub rsi: String,
}

/// Full replacement payload for the stock list. An empty filtered result
/// carries the explicit "no matches" placeholder instead of a bare empty
/// container.
#[derive(Debug, Clone, Serialize)]
pub struct StockListView {
    pub cards: Vec<StockCard>,
    pub placeholder: Option<String>,
}

/// Session cache of the screened stock collection. The collection is
/// fetched once per refresh and replaced wholesale; filtering and sorting
/// read a snapshot and never touch the cache.
#[derive(Default)]
pub struct StockStore {
    stocks: Mutex<Vec<Stock>>,
}

impl StockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the highlighted stocks and replace the cached collection.
    pub async fn refresh<A: ScreenerApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        let stocks = api.highlighted_stocks().await?;
        if let Ok(mut guard) = self.stocks.lock() {
            *guard = stocks;
        }
        Ok(())
    }

    /// Render the cached collection through the current filter and sort.
    pub fn view(&self, sector_filter: &str, sort: SortKey) -> StockListView {
        let snapshot = self
            .stocks
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        build_view(&filter_and_sort(&snapshot, sector_filter, sort))
    }
}

fn build_view(stocks: &[Stock]) -> StockListView {
    if stocks.is_empty() {
        return StockListView {
            cards: Vec::new(),
            placeholder: Some(NO_MATCHES.to_string()),
        };
    }
    StockListView {
        cards: stocks.iter().map(build_card).collect(),
        placeholder: None,
    }
}

fn build_card(stock: &Stock) -> StockCard {
    StockCard {
        ticker: stock.ticker.clone(),
        title: format!("{} - {}", stock.ticker, stock.name.as_deref().unwrap_or(NA)),
        sector: text_or_na(stock.sector.as_deref()),
        score: fmt_or_na(stock.score),
        price_change_pct: fmt_or_na(stock.price_change_pct),
        volume_ratio: fmt_or_na(stock.volume_ratio),
        pe_ratio: fmt_or_na(stock.pe_ratio),
        dividend_yield_pct: fmt_or_na(stock.dividend_yield.map(|y| y * 100.0)),
        avg_sentiment: fmt_or_na(stock.avg_sentiment),
        price_vs_ma50: text_or_na(stock.price_vs_ma50.as_deref()),
        rsi: fmt_or_na(stock.rsi),
    }
}

fn fmt_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NA.to_string(),
    }
}

fn text_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NA).to_string()
}
