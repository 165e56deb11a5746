pub mod api;
pub mod dashboard;
pub mod expenses;
pub mod insights;
pub mod records;
pub mod selection;
pub mod views;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(dashboard::index))
        .route("/add", get(expenses::new_form))
        .route("/records", get(records::index))
        .route("/records/export", get(records::export))
        .route("/insights", get(insights::index))
        // Expense CRUD
        .route("/expenses/create", post(expenses::create))
        .route("/expenses/:id", delete(expenses::delete_api))
        .route("/expenses/:id/edit", get(expenses::edit_form))
        .route("/expenses/:id/update", post(expenses::update))
        .route("/expenses/:id/delete", post(expenses::delete))
        // API (JSON)
        .route("/api/expenses", get(api::expenses))
        .route("/api/analytics/summary", get(api::summary))
        .route(
            "/api/analytics/category-totals",
            get(api::category_totals_json),
        )
        .route(
            "/api/analytics/category-maxima",
            get(api::category_maxima_json),
        )
        .route("/api/analytics/weekly", get(api::weekly))
        .route("/api/analytics/monthly", get(api::monthly))
        .route("/api/analytics/matrix", get(api::matrix))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
