use crate::backend::HttpBackend;
use crate::details::{DetailsOutcome, DetailsSession};
use crate::filter_sort::{SortKey, ALL_SECTORS};
use crate::form::HoldingForm;
use crate::portfolio::{PortfolioStore, PortfolioTable};
use crate::stock_list::{StockListView, StockStore};
use log::error;
use tauri::State;

/// The live backend client, shared by every command.
pub struct ApiState(pub HttpBackend);

#[tauri::command]
pub async fn load_stocks(
    api: State<'_, ApiState>,
    stocks: State<'_, StockStore>,
) -> Result<StockListView, String> {
    stocks.refresh(&api.0).await.map_err(|e| {
        error!("Failed to fetch highlighted stocks: {e}");
        "Error loading stocks. Please try again later.".to_string()
    })?;
    Ok(stocks.view(ALL_SECTORS, SortKey::default()))
}

#[tauri::command]
pub async fn apply_stock_filters(
    sector: String,
    sort_by: SortKey,
    stocks: State<'_, StockStore>,
) -> Result<StockListView, String> {
    Ok(stocks.view(&sector, sort_by))
}

#[tauri::command]
pub async fn open_stock_details(
    ticker: String,
    api: State<'_, ApiState>,
    details: State<'_, DetailsSession>,
) -> Result<DetailsOutcome, String> {
    details.open(&api.0, &ticker).await.map_err(|e| {
        error!("Failed to fetch details for {ticker}: {e}");
        format!("Could not load details for {ticker}.")
    })
}

#[tauri::command]
pub async fn close_stock_details(details: State<'_, DetailsSession>) -> Result<(), String> {
    details.close();
    Ok(())
}

#[tauri::command]
pub async fn load_portfolio(
    api: State<'_, ApiState>,
    portfolio: State<'_, PortfolioStore>,
) -> Result<PortfolioTable, String> {
    portfolio.refresh(&api.0).await.map_err(|e| {
        error!("Failed to fetch portfolio: {e}");
        "Error loading portfolio.".to_string()
    })?;
    Ok(portfolio.table())
}

#[tauri::command]
pub async fn portfolio_rows(portfolio: State<'_, PortfolioStore>) -> Result<PortfolioTable, String> {
    Ok(portfolio.table())
}

#[tauri::command]
pub async fn add_holding(
    form: HoldingForm,
    api: State<'_, ApiState>,
    portfolio: State<'_, PortfolioStore>,
) -> Result<String, String> {
    portfolio
        .add(&api.0, &form)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_prompt(
    id: i64,
    portfolio: State<'_, PortfolioStore>,
) -> Result<String, String> {
    portfolio
        .delete_prompt(id)
        .ok_or_else(|| "Holding not found".to_string())
}

/// Issues the delete only when the user confirmed the prompt; a declined
/// confirmation performs no request and changes nothing.
#[tauri::command]
pub async fn delete_holding(
    id: i64,
    confirmed: bool,
    api: State<'_, ApiState>,
    portfolio: State<'_, PortfolioStore>,
) -> Result<Option<String>, String> {
    if !confirmed {
        return Ok(None);
    }
    portfolio
        .remove(&api.0, id)
        .await
        .map(Some)
        .map_err(|e| e.to_string())
}
