use crate::types::NewHolding;
use chrono::NaiveDate;
use serde::Deserialize;

const MSG_REQUIRED: &str = "All fields are required.";
const MSG_POSITIVE: &str = "Quantity and Price must be positive.";
const MSG_INVALID: &str =
    "Invalid value for quantity, purchase_price, or purchase_date (YYYY-MM-DD).";

/// Raw add-holding form exactly as the webview submits it: every field a
/// string, nothing trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingForm {
    pub ticker: String,
    pub quantity: String,
    pub purchase_price: String,
    pub purchase_date: String,
}

/// Validate the form and build the wire body. Checks mirror the backend's
/// own: all fields present, quantity a positive integer, price a positive
/// number, date in YYYY-MM-DD. The ticker is normalized to uppercase. The
/// error is a user-facing validation message; no request is made here.
pub fn validate(form: &HoldingForm) -> Result<NewHolding, String> {
    let ticker = form.ticker.trim().to_uppercase();
    let quantity = form.quantity.trim();
    let purchase_price = form.purchase_price.trim();
    let purchase_date = form.purchase_date.trim();

    if ticker.is_empty() || quantity.is_empty() || purchase_price.is_empty() || purchase_date.is_empty()
    {
        return Err(MSG_REQUIRED.to_string());
    }

    let parsed_quantity: i64 = quantity.parse().map_err(|_| MSG_INVALID.to_string())?;
    let parsed_price: f64 = purchase_price.parse().map_err(|_| MSG_INVALID.to_string())?;
    NaiveDate::parse_from_str(purchase_date, "%Y-%m-%d").map_err(|_| MSG_INVALID.to_string())?;

    if parsed_quantity <= 0 || parsed_price <= 0.0 {
        return Err(MSG_POSITIVE.to_string());
    }

    Ok(NewHolding {
        ticker,
        quantity: quantity.to_string(),
        purchase_price: purchase_price.to_string(),
        purchase_date: purchase_date.to_string(),
    })
}
