use crate::types::Stock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sector filter value meaning "no filtering".
pub const ALL_SECTORS: &str = "all";

/// Sort orders offered by the stock list controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    ScoreDesc,
    ScoreAsc,
    PriceChangeDesc,
    PriceChangeAsc,
    SentimentDesc,
    SentimentAsc,
}

/// Filter the collection by sector, then order it by the requested key.
/// Returns a new vector; the input is never mutated. The sort is stable,
/// so records with equal keys keep their incoming order.
pub fn filter_and_sort(stocks: &[Stock], sector_filter: &str, sort: SortKey) -> Vec<Stock> {
    let mut filtered: Vec<Stock> = stocks
        .iter()
        .filter(|s| sector_filter == ALL_SECTORS || s.sector.as_deref() == Some(sector_filter))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| compare(a, b, sort));
    filtered
}

/// Ordering for one pair of stocks under a sort key. A missing score counts
/// as 0.0; missing price change and sentiment count as -inf when descending
/// and +inf when ascending, so they land at the end in both directions.
fn compare(a: &Stock, b: &Stock, sort: SortKey) -> Ordering {
    match sort {
        SortKey::ScoreDesc => desc(a.score.unwrap_or(0.0), b.score.unwrap_or(0.0)),
        SortKey::ScoreAsc => asc(a.score.unwrap_or(0.0), b.score.unwrap_or(0.0)),
        SortKey::PriceChangeDesc => desc(
            a.price_change.unwrap_or(f64::NEG_INFINITY),
            b.price_change.unwrap_or(f64::NEG_INFINITY),
        ),
        SortKey::PriceChangeAsc => asc(
            a.price_change.unwrap_or(f64::INFINITY),
            b.price_change.unwrap_or(f64::INFINITY),
        ),
        SortKey::SentimentDesc => desc(
            a.avg_sentiment.unwrap_or(f64::NEG_INFINITY),
            b.avg_sentiment.unwrap_or(f64::NEG_INFINITY),
        ),
        SortKey::SentimentAsc => asc(
            a.avg_sentiment.unwrap_or(f64::INFINITY),
            b.avg_sentiment.unwrap_or(f64::INFINITY),
        ),
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
