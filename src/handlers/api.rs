use axum::extract::{Query, State};
use axum::response::Json;
use serde::Serialize;

use crate::date_utils::week_end;
use crate::error::AppResult;
use crate::filters::CURRENCY_CODE;
use crate::handlers::selection::SelectionParams;
use crate::models::{Category, Expense};
use crate::services::analytics::{
    category_maxima, category_month_matrix, category_totals, monthly_totals, weekly_totals,
    CategoryMonthMatrix, CategoryTotal, MonthlyTotal, SpendingSummary, WeeklyTotal,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExpenseList {
    pub currency: &'static str,
    pub month: String,
    pub category: String,
    pub sort: String,
    pub total_cents: i64,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Serialize)]
pub struct CategoryMaximum {
    pub category: Category,
    pub value_cents: i64,
    pub item: String,
    pub expense_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week_start: String,
    pub week_end: String,
    pub label: String,
    pub total_cents: i64,
}

impl From<WeeklyTotal> for WeeklyPoint {
    fn from(w: WeeklyTotal) -> Self {
        Self {
            week_start: w.week_start.format("%Y-%m-%d").to_string(),
            week_end: week_end(w.week_start).format("%Y-%m-%d").to_string(),
            label: w.label(),
            total_cents: w.total_cents,
        }
    }
}

/// Filtered set for the request's selection, in store order.
fn filtered(state: &AppState, params: &SelectionParams) -> AppResult<Vec<Expense>> {
    let store = state.read_store()?;
    let selection = params.resolve(&store.months());
    Ok(selection.filter().apply(store.all()))
}

pub async fn expenses(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Json<ExpenseList>> {
    let store = state.read_store()?;
    let selection = params.resolve(&store.months());
    let sorted = selection.sort.apply(&selection.filter().apply(store.all()));

    Ok(Json(ExpenseList {
        currency: CURRENCY_CODE,
        month: selection.month.key(),
        category: selection.category.key().to_string(),
        sort: selection.sort.key(),
        total_cents: sorted.iter().map(|e| e.price_cents).sum(),
        expenses: sorted,
    }))
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Json<SpendingSummary>> {
    let expenses = filtered(&state, &params)?;
    Ok(Json(SpendingSummary::from_expenses(&expenses)))
}

pub async fn category_totals_json(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Json<Vec<CategoryTotal>>> {
    let expenses = filtered(&state, &params)?;
    Ok(Json(category_totals(&expenses)))
}

pub async fn category_maxima_json(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Json<Vec<CategoryMaximum>>> {
    let expenses = filtered(&state, &params)?;
    let maxima = category_maxima(&expenses)
        .into_iter()
        .map(|m| CategoryMaximum {
            category: m.category,
            value_cents: m.value_cents(),
            item: m.label().to_string(),
            expense_id: m.top.as_ref().map(|e| e.id),
        })
        .collect();
    Ok(Json(maxima))
}

pub async fn weekly(
    State(state): State<AppState>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Json<Vec<WeeklyPoint>>> {
    let expenses = filtered(&state, &params)?;
    Ok(Json(
        weekly_totals(&expenses)
            .into_iter()
            .map(WeeklyPoint::from)
            .collect(),
    ))
}

/// Monthly totals always cover the whole store.
pub async fn monthly(State(state): State<AppState>) -> AppResult<Json<Vec<MonthlyTotal>>> {
    let store = state.read_store()?;
    Ok(Json(monthly_totals(store.all())))
}

pub async fn matrix(State(state): State<AppState>) -> AppResult<Json<CategoryMonthMatrix>> {
    let store = state.read_store()?;
    Ok(Json(category_month_matrix(store.all())))
}
