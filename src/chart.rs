use crate::types::PricePoint;
use chrono::NaiveDate;
use serde::Serialize;

const DATASET_LABEL: &str = "Close Price";
const X_AXIS_TITLE: &str = "Date";
const Y_AXIS_TITLE: &str = "Price";

/// Render-ready description of the price line chart: x labels and y series
/// taken verbatim from the chronological price history, plus human-readable
/// tooltip dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    pub tooltips: Vec<String>,
    pub dataset_label: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
}

/// A live chart. The id distinguishes successive renders so the frontend
/// can tell a rebuilt chart from a stale one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInstance {
    pub id: u64,
    pub spec: ChartSpec,
}

/// Owns at most one chart instance at a time, scoped to the details view.
/// Rendering destroys the previous instance before creating the new one;
/// disposing is idempotent.
#[derive(Debug, Default)]
pub struct ChartAdapter {
    instance: Option<ChartInstance>,
    next_id: u64,
}

impl ChartAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy any existing instance, then build a new line chart from the
    /// ordered (date, price) series.
    pub fn render(&mut self, history: &[PricePoint]) -> &ChartInstance {
        self.dispose();
        self.next_id += 1;
        self.instance.insert(ChartInstance {
            id: self.next_id,
            spec: build_spec(history),
        })
    }

    /// Destroy the instance and clear the reference. Safe to call when no
    /// chart exists.
    pub fn dispose(&mut self) {
        self.instance = None;
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    pub fn instance_count(&self) -> usize {
        usize::from(self.instance.is_some())
    }
}

fn build_spec(history: &[PricePoint]) -> ChartSpec {
    ChartSpec {
        kind: "line",
        labels: history.iter().map(|p| p.date.clone()).collect(),
        prices: history.iter().map(|p| p.price).collect(),
        tooltips: history.iter().map(|p| tooltip_date(&p.date)).collect(),
        dataset_label: DATASET_LABEL,
        x_axis_title: X_AXIS_TITLE,
        y_axis_title: Y_AXIS_TITLE,
    }
}

/// Format a YYYY-MM-DD date for tooltips, e.g. "Sep 4, 2019". A date that
/// does not parse passes through unchanged.
fn tooltip_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}
