use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use tracing::debug;

use crate::error::{AppResult, RenderHtml};
use crate::filters::format_money;
use crate::handlers::selection::{Selection, SelectionParams};
use crate::handlers::views::{count_label, expense_rows, ExpenseRow, Layout, SelectOption};
use crate::services::analytics::{category_maxima, category_totals, SpendingSummary};
use crate::services::charts::{bar_rows, donut_slices, BarInput, BarRow, DonutSlice, DONUT_SIZE};
use crate::services::filter::{drilldown_items, DrillTarget};
use crate::state::AppState;

const DRILL_ALL_COLOR: &str = "#4F46E5";
const DRILL_ALL_ICON: &str = "📋";

/// Highest-priced record of one category, linked to its drill-down.
pub struct TopItem {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub item: String,
    pub value_display: String,
    pub href: String,
    pub active: bool,
}

/// The expanded list behind a card, slice or bar.
pub struct DrillPanel {
    pub title: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub summary: String,
    pub close_href: String,
}

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub month_options: Vec<SelectOption>,
    pub category_options: Vec<SelectOption>,
    pub month_label: String,
    pub total_display: String,
    pub count_display: String,
    pub all_href: String,
    pub drill_all_active: bool,
    pub highest_display: String,
    pub highest_item: String,
    pub top_items: Vec<TopItem>,
    pub donut_size: f64,
    pub donut_slices: Vec<DonutSlice>,
    pub bars: Vec<BarRow>,
    pub drill: Option<DrillPanel>,
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
    let filtered = selection.filter().apply(store.all());
    debug!(
        month = %selection.month.key(),
        category = selection.category.key(),
        count = filtered.len(),
        "Rendering dashboard"
    );

    let summary = SpendingSummary::from_expenses(&filtered);
    let totals = category_totals(&filtered);

    let top_items = category_maxima(&filtered)
        .into_iter()
        .filter_map(|m| {
            let top = m.top.as_ref()?;
            let target = DrillTarget::Category(m.category);
            Some(TopItem {
                name: m.category.name(),
                color: m.category.color(),
                icon: m.category.icon(),
                item: top.item.clone(),
                value_display: format_money(top.price_cents),
                href: selection.drill_href(target),
                active: selection.drill == Some(target),
            })
        })
        .collect();

    let slice_input: Vec<_> = totals.iter().map(|t| (t.category, t.total_cents)).collect();
    let donut = donut_slices(&slice_input, |c| {
        selection.drill_href(DrillTarget::Category(c))
    });

    let bars = bar_rows(
        totals
            .iter()
            .map(|t| BarInput {
                label: t.category.name().to_string(),
                value_cents: t.total_cents,
                color: Some(t.category.color()),
                href: Some(selection.drill_href(DrillTarget::Category(t.category))),
            })
            .collect(),
    );

    let (drill, rows) = match selection.drill {
        Some(target) => {
            let items = drilldown_items(store.all(), selection.month, target);
            let total: i64 = items.iter().map(|e| e.price_cents).sum();
            let panel = drill_panel(&selection, target, items.len(), total);
            (Some(panel), expense_rows(&items))
        }
        None => (None, Vec::new()),
    };

    let template = DashboardTemplate {
        layout: Layout::new("Dashboard", "dashboard", &store),
        month_options: selection.month_options(&months),
        category_options: selection.category_options("All Categories"),
        month_label: selection.month.label(),
        total_display: summary.total_display(),
        count_display: count_label(summary.expense_count, "transaction"),
        all_href: selection.drill_href(DrillTarget::All),
        drill_all_active: selection.drill == Some(DrillTarget::All),
        highest_display: summary.highest_display(),
        highest_item: summary.highest_item().to_string(),
        top_items,
        donut_size: DONUT_SIZE,
        donut_slices: donut,
        bars,
        drill,
        rows,
        empty_message: "No transactions in this category for the selected period.".into(),
        return_to: selection_return_to(&selection),
    };

    template.render_html()
}

fn drill_panel(selection: &Selection, target: DrillTarget, count: usize, total: i64) -> DrillPanel {
    let month_label = selection.month.label();
    let (title, icon, color) = match target {
        DrillTarget::All => (
            format!("All Transactions · {month_label}"),
            DRILL_ALL_ICON,
            DRILL_ALL_COLOR,
        ),
        DrillTarget::Category(c) => (
            format!("{} · {month_label}", c.name()),
            c.icon(),
            c.color(),
        ),
    };
    DrillPanel {
        title,
        icon,
        color,
        summary: format!(
            "{} · Total: {}",
            count_label(count, "transaction"),
            format_money(total)
        ),
        close_href: selection.dashboard_href(),
    }
}

/// Deleting from the drill-down panel lands back on the same panel.
fn selection_return_to(selection: &Selection) -> String {
    match selection.drill {
        Some(target) => selection.drill_href(target),
        None => selection.dashboard_href(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_drill_panel_for_category() {
        let selection = SelectionParams {
            month: Some("2025-02".into()),
            ..Default::default()
        }
        .resolve(&[]);
        let panel = drill_panel(&selection, DrillTarget::Category(Category::Food), 2, 1300);
        assert_eq!(panel.title, "Food · February 2025");
        assert_eq!(panel.summary, "2 transactions · Total: S$13.00");
        assert_eq!(panel.color, "#FF6B6B");
        assert_eq!(panel.close_href, "/?month=2025-02&category=All");
    }

    #[test]
    fn test_drill_panel_for_all() {
        let selection = SelectionParams {
            month: Some("All".into()),
            ..Default::default()
        }
        .resolve(&[]);
        let panel = drill_panel(&selection, DrillTarget::All, 1, 550);
        assert_eq!(panel.title, "All Transactions · All Time");
        assert_eq!(panel.summary, "1 transaction · Total: S$5.50");
    }
}
