mod backend;
mod chart;
mod commands;
mod config;
mod details;
mod filter_sort;
mod form;
mod portfolio;
mod stock_list;
mod types;

use backend::HttpBackend;
use commands::ApiState;
use details::DetailsSession;
use portfolio::PortfolioStore;
use stock_list::StockStore;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            commands::load_stocks,
            commands::apply_stock_filters,
            commands::open_stock_details,
            commands::close_stock_details,
            commands::load_portfolio,
            commands::portfolio_rows,
            commands::add_holding,
            commands::delete_prompt,
            commands::delete_holding,
        ])
        .setup(|app| {
            app.manage(ApiState(HttpBackend::new(config::api_base_url())));
            app.manage(StockStore::new());
            app.manage(PortfolioStore::new());
            app.manage(DetailsSession::new());

            // One-time initial load; every later fetch is user-triggered.
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let api = handle.state::<ApiState>();
                let stocks = handle.state::<StockStore>();
                let portfolio = handle.state::<PortfolioStore>();

                if let Err(e) = stocks.refresh(&api.0).await {
                    log::error!("Initial stock load failed: {e}");
                }
                if let Err(e) = portfolio.refresh(&api.0).await {
                    log::error!("Initial portfolio load failed: {e}");
                }
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
