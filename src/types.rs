use serde::{Deserialize, Serialize};

/// One screened stock as returned by the highlighted-stocks endpoint.
/// Everything except the ticker may be absent; absent values are displayed
/// as "N/A", never as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub score: Option<f64>,
    pub price_change: Option<f64>,
    pub price_change_pct: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub pe_ratio: Option<f64>,
    /// Fraction in the 0-1 range; rendered as a percent.
    pub dividend_yield: Option<f64>,
    pub avg_sentiment: Option<f64>,
    pub price_vs_ma50: Option<String>,
    pub rsi: Option<f64>,
}

/// Single point of a stock's price history, chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// Full detail record for one stock: narrative analysis plus price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDetails {
    pub ticker: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub gemini_summary: Option<String>,
    #[serde(default)]
    pub bullish_points: Vec<String>,
    #[serde(default)]
    pub bearish_points: Vec<String>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

/// One portfolio holding. The id is assigned by the backend and is the
/// delete key; latest_price and latest_score are backend-joined context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub id: i64,
    pub ticker: String,
    pub name: Option<String>,
    pub quantity: i64,
    pub purchase_price: f64,
    pub purchase_date: String,
    pub latest_price: Option<f64>,
    pub latest_score: Option<f64>,
}

/// Wire body of the add-holding request. The backend expects the form's
/// string-typed fields; validation happens before this is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHolding {
    pub ticker: String,
    pub quantity: String,
    pub purchase_price: String,
    pub purchase_date: String,
}

/// Success body of a portfolio mutation. The add endpoint also returns the
/// new holding's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationAck {
    pub message: Option<String>,
    pub id: Option<i64>,
}

/// Error body the backend attaches to non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_json_full_record() {
        let json = r#"{
            "ticker": "ACLS",
            "name": "Axcelis Technologies",
            "sector": "Technology",
            "score": 4.25,
            "price_change": 1.2,
            "price_change_pct": 2.31,
            "volume_ratio": 1.8,
            "pe_ratio": 14.2,
            "dividend_yield": 0.012,
            "avg_sentiment": 0.6,
            "price_vs_ma50": "above",
            "rsi": 61.4
        }"#;
        let stock: Stock = serde_json::from_str(json).unwrap();
        assert_eq!(stock.ticker, "ACLS");
        assert_eq!(stock.sector.as_deref(), Some("Technology"));
        assert_eq!(stock.score, Some(4.25));
        assert_eq!(stock.price_vs_ma50.as_deref(), Some("above"));
    }

    #[test]
    fn test_stock_json_nulls_and_missing_fields_give_none() {
        // The backend nulls out NaN/Infinity values and omits columns it
        // has no data for; both shapes must deserialize to None.
        let json = r#"{"ticker": "XYZ", "score": null, "name": "X Corp"}"#;
        let stock: Stock = serde_json::from_str(json).unwrap();
        assert_eq!(stock.ticker, "XYZ");
        assert!(stock.score.is_none());
        assert!(stock.sector.is_none());
        assert!(stock.pe_ratio.is_none());
        assert!(stock.rsi.is_none());
    }

    #[test]
    fn test_stock_details_json_full_record() {
        let json = r#"{
            "ticker": "ACLS",
            "name": "Axcelis Technologies",
            "sector": "Technology",
            "gemini_summary": "Strong quarter.",
            "bullish_points": ["Revenue growth", "Margin expansion"],
            "bearish_points": ["Cyclical demand"],
            "price_history": [
                {"date": "2024-01-02", "price": 130.5},
                {"date": "2024-01-03", "price": 131.0}
            ]
        }"#;
        let details: StockDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.bullish_points.len(), 2);
        assert_eq!(details.bearish_points.len(), 1);
        assert_eq!(details.price_history.len(), 2);
        assert_eq!(details.price_history[0].date, "2024-01-02");
    }

    #[test]
    fn test_stock_details_json_missing_lists_default_empty() {
        let json = r#"{"ticker": "XYZ"}"#;
        let details: StockDetails = serde_json::from_str(json).unwrap();
        assert!(details.gemini_summary.is_none());
        assert!(details.bullish_points.is_empty());
        assert!(details.bearish_points.is_empty());
        assert!(details.price_history.is_empty());
    }

    #[test]
    fn test_holding_json_with_joined_context() {
        let json = r#"{
            "id": 7,
            "ticker": "ACLS",
            "name": "Axcelis Technologies",
            "quantity": 10,
            "purchase_price": 100.0,
            "purchase_date": "2024-01-15",
            "latest_price": 120.0,
            "latest_score": -0.5
        }"#;
        let holding: PortfolioHolding = serde_json::from_str(json).unwrap();
        assert_eq!(holding.id, 7);
        assert_eq!(holding.quantity, 10);
        assert_eq!(holding.latest_price, Some(120.0));
    }

    #[test]
    fn test_holding_json_null_joined_context() {
        // A holding whose ticker has no recent price or score rows.
        let json = r#"{
            "id": 3,
            "ticker": "OLD",
            "name": null,
            "quantity": 5,
            "purchase_price": 40.0,
            "purchase_date": "2023-06-01",
            "latest_price": null,
            "latest_score": null
        }"#;
        let holding: PortfolioHolding = serde_json::from_str(json).unwrap();
        assert!(holding.name.is_none());
        assert!(holding.latest_price.is_none());
        assert!(holding.latest_score.is_none());
    }

    #[test]
    fn test_new_holding_serializes_string_fields() {
        let body = NewHolding {
            ticker: "ACLS".to_string(),
            quantity: "10".to_string(),
            purchase_price: "100.50".to_string(),
            purchase_date: "2024-01-15".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        // The backend parses these itself; they must go out as strings.
        assert_eq!(json["quantity"], "10");
        assert_eq!(json["purchase_price"], "100.50");
    }

    #[test]
    fn test_mutation_ack_with_and_without_message() {
        let ack: MutationAck =
            serde_json::from_str(r#"{"message": "Holding added successfully", "id": 12}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Holding added successfully"));
        assert_eq!(ack.id, Some(12));

        let ack: MutationAck = serde_json::from_str(r#"{}"#).unwrap();
        assert!(ack.message.is_none());
        assert!(ack.id.is_none());
    }

    #[test]
    fn test_error_body_optional_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Holding not found"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Holding not found"));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.error.is_none());
    }
}
