use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use tracing::debug;

use crate::error::{AppResult, RenderHtml};
use crate::filters::format_money;
use crate::handlers::selection::{InsightsView, SelectionParams};
use crate::handlers::views::{Layout, SelectOption};
use crate::services::analytics::{
    category_month_matrix, monthly_totals, weekly_totals, CategoryMonthMatrix, NO_ENTRY_LABEL,
};
use crate::services::charts::{bar_rows, BarInput, BarRow};
use crate::state::AppState;

pub struct MatrixRowView {
    pub label: String,
    pub cells: Vec<MatrixCell>,
    pub total_display: String,
}

pub struct MatrixCell {
    pub display: String,
    pub empty: bool,
}

/// The category × month table, formatted for display.
pub struct MatrixView {
    pub headers: Vec<String>,
    pub rows: Vec<MatrixRowView>,
    pub column_totals: Vec<String>,
    pub grand_total: String,
}

impl From<&CategoryMonthMatrix> for MatrixView {
    fn from(matrix: &CategoryMonthMatrix) -> Self {
        Self {
            headers: matrix.months.iter().map(|m| m.short_label()).collect(),
            rows: matrix
                .rows
                .iter()
                .map(|row| MatrixRowView {
                    label: format!("{} {}", row.category.icon(), row.category.name()),
                    cells: row
                        .cells
                        .iter()
                        .map(|&cents| MatrixCell {
                            display: if cents > 0 {
                                format_money(cents)
                            } else {
                                NO_ENTRY_LABEL.to_string()
                            },
                            empty: cents <= 0,
                        })
                        .collect(),
                    total_display: format_money(row.total_cents),
                })
                .collect(),
            column_totals: matrix.column_totals.iter().map(|&c| format_money(c)).collect(),
            grand_total: format_money(matrix.grand_total_cents),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/insights.html")]
pub struct InsightsTemplate {
    pub layout: Layout,
    pub is_weekly: bool,
    pub monthly_href: String,
    pub weekly_href: String,
    pub month_options: Vec<SelectOption>,
    pub bars: Vec<BarRow>,
    pub matrix: MatrixView,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Html<String>> {
    let store = state.read_store()?;
    let months = store.months();
    let selection = params.resolve(&months);
    debug!(view = selection.view.as_str(), "Rendering insights");

    let bars = match selection.view {
        InsightsView::Monthly => bar_rows(
            monthly_totals(store.all())
                .into_iter()
                .map(|m| BarInput {
                    href: Some(format!("/?month={}&drill=All", m.month.key())),
                    label: m.label,
                    value_cents: m.total_cents,
                    color: None,
                })
                .collect(),
        ),
        InsightsView::Weekly => bar_rows(
            weekly_totals(&selection.filter().apply(store.all()))
                .into_iter()
                .map(|w| BarInput {
                    label: w.label(),
                    value_cents: w.total_cents,
                    color: None,
                    href: None,
                })
                .collect(),
        ),
    };

    let template = InsightsTemplate {
        layout: Layout::new("Insights", "insights", &store),
        is_weekly: selection.view == InsightsView::Weekly,
        monthly_href: selection.insights_href(InsightsView::Monthly),
        weekly_href: selection.insights_href(InsightsView::Weekly),
        month_options: selection.month_options(&months),
        bars,
        matrix: MatrixView::from(&category_month_matrix(store.all())),
    };

    template.render_html()
}
