use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, RenderHtml};
use crate::handlers::views::{draft_category_options, draft_payer_options, Layout, SelectOption};
use crate::models::{ExpenseDraft, ValidationError};
use crate::state::AppState;

const DEFAULT_RETURN_TO: &str = "/records";

#[derive(Template)]
#[template(path = "pages/add.html")]
pub struct ExpenseFormTemplate {
    pub layout: Layout,
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub form_action: String,
    pub is_edit: bool,
    pub draft: ExpenseDraft,
    pub category_options: Vec<SelectOption>,
    pub payer_options: Vec<SelectOption>,
    pub saved_message: Option<String>,
    pub error: Option<String>,
    pub error_field: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddParams {
    pub saved: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub return_to: Option<String>,
}

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy)]
enum FormMode {
    Create,
    Edit(i64),
}

fn render_form(
    state: &AppState,
    mode: FormMode,
    draft: ExpenseDraft,
    saved_message: Option<String>,
    error: Option<&ValidationError>,
) -> AppResult<Html<String>> {
    let store = state.read_store()?;

    let (heading, submit_label, form_action, is_edit) = match mode {
        FormMode::Create => (
            "➕ Add New Expense",
            "💾 Save Expense",
            "/expenses/create".to_string(),
            false,
        ),
        FormMode::Edit(id) => (
            "✏️ Edit Expense",
            "💾 Update",
            format!("/expenses/{}/update", id),
            true,
        ),
    };

    let template = ExpenseFormTemplate {
        layout: Layout::new(if is_edit { "Edit Expense" } else { "Add Expense" }, "add", &store),
        heading,
        submit_label,
        form_action,
        is_edit,
        category_options: draft_category_options(&draft),
        payer_options: draft_payer_options(&draft),
        draft,
        saved_message,
        error: error.map(|e| e.to_string()),
        error_field: error.map_or("", |e| e.field()),
    };

    template.render_html()
}

fn saved_message(saved: Option<&str>) -> Option<String> {
    match saved? {
        "added" => Some("Expense added successfully!".into()),
        "updated" => Some("Expense updated successfully!".into()),
        _ => None,
    }
}

/// Only same-site absolute paths are followed after a delete.
fn sanitize_return_to(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_RETURN_TO,
    }
}

pub async fn new_form(
    State(state): State<AppState>,
    Query(params): Query<AddParams>,
) -> AppResult<Html<String>> {
    let draft = ExpenseDraft::blank(Local::now().date_naive());
    render_form(
        &state,
        FormMode::Create,
        draft,
        saved_message(params.saved.as_deref()),
        None,
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(draft): Form<ExpenseDraft>,
) -> AppResult<Response> {
    let result = {
        let mut store = state.write_store()?;
        store.create(&draft).map(|e| e.id)
    };

    match result {
        Ok(id) => {
            info!(expense_id = id, "Created expense");
            Ok(Redirect::to("/add?saved=added").into_response())
        }
        Err(err) => {
            warn!(field = err.field(), "Rejected new expense: {}", err);
            render_form(&state, FormMode::Create, draft, None, Some(&err))
                .map(IntoResponse::into_response)
        }
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let draft = {
        let store = state.read_store()?;
        let expense = store
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Expense {} not found", id)))?;
        ExpenseDraft::from(expense)
    };
    debug!(expense_id = id, "Editing expense");

    render_form(&state, FormMode::Edit(id), draft, None, None)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(draft): Form<ExpenseDraft>,
) -> AppResult<Response> {
    let result = {
        let mut store = state.write_store()?;
        store.update(id, &draft)
    };

    match result {
        Ok(true) => {
            info!(expense_id = id, "Updated expense");
            Ok(Redirect::to("/add?saved=updated").into_response())
        }
        Ok(false) => {
            warn!(expense_id = id, "Ignoring update of unknown expense");
            Ok(Redirect::to(DEFAULT_RETURN_TO).into_response())
        }
        Err(err) => {
            warn!(expense_id = id, field = err.field(), "Rejected expense update: {}", err);
            render_form(&state, FormMode::Edit(id), draft, None, Some(&err))
                .map(IntoResponse::into_response)
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Redirect> {
    let removed = state.write_store()?.delete(id);
    if removed {
        info!(expense_id = id, "Deleted expense");
    } else {
        debug!(expense_id = id, "Delete of unknown expense ignored");
    }

    Ok(Redirect::to(sanitize_return_to(form.return_to.as_deref())))
}

pub async fn delete_api(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = state.write_store()?.delete(id);
    debug!(expense_id = id, removed, "Deleted expense via API");
    Ok(StatusCode::OK)
}
