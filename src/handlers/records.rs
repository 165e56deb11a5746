use askama::Template;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use tracing::{debug, info};

use crate::error::{AppResult, RenderHtml};
use crate::filters::format_money;
use crate::handlers::selection::SelectionParams;
use crate::handlers::views::{count_label, expense_rows, ExpenseRow, Layout, SelectOption};
use crate::services::csv_export::{export_csv, export_filename};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/records.html")]
pub struct RecordsTemplate {
    pub layout: Layout,
    pub search: String,
    pub month_options: Vec<SelectOption>,
    pub category_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    pub count_display: String,
    pub total_display: String,
    pub export_href: String,
    pub rows: Vec<ExpenseRow>,
    pub empty_message: String,
    pub return_to: String,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Html<String>> {
    let store = state.read_store()?;
    let months = store.months();
    let selection = params.resolve(&months);
    let sorted = selection.sort.apply(&selection.filter().apply(store.all()));
    let total: i64 = sorted.iter().map(|e| e.price_cents).sum();
    debug!(count = sorted.len(), sort = %selection.sort.key(), "Rendering records");

    let template = RecordsTemplate {
        layout: Layout::new("Records", "records", &store),
        search: selection.search.clone(),
        month_options: selection.month_options(&months),
        category_options: selection.category_options("All"),
        sort_options: selection.sort_options(),
        count_display: count_label(sorted.len(), "record"),
        total_display: format_money(total),
        export_href: selection.export_href(),
        rows: expense_rows(&sorted),
        empty_message: "No transactions found.".into(),
        return_to: selection.records_href(),
    };

    template.render_html()
}

/// Download the current sorted/filtered list as CSV.
pub async fn export(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<impl IntoResponse> {
    let (csv, filename) = {
        let store = state.read_store()?;
        let selection = params.resolve(&store.months());
        let sorted = selection.sort.apply(&selection.filter().apply(store.all()));
        info!(count = sorted.len(), month = %selection.month.key(), "Exporting expenses");
        (export_csv(&sorted)?, export_filename(&selection.month))
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
