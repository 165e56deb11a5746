//! Display-ready values shared by the page templates.

use crate::filters::format_money;
use crate::models::{Category, Expense, ExpenseDraft, Payer};
use crate::store::ExpenseStore;
use crate::VERSION;

/// Header and navigation data every page renders.
pub struct Layout {
    pub title: String,
    pub version: &'static str,
    pub active_tab: &'static str,
    pub all_time_display: String,
}

impl Layout {
    pub fn new(title: &str, active_tab: &'static str, store: &ExpenseStore) -> Self {
        Self {
            title: title.to_string(),
            version: VERSION,
            active_tab,
            all_time_display: format_money(store.total_cents()),
        }
    }

    /// Layout without the all-time total, for when the store is unreadable.
    pub fn bare(title: &str) -> Self {
        Self {
            title: title.to_string(),
            version: VERSION,
            active_tab: "",
            all_time_display: String::new(),
        }
    }

    pub fn is_tab(&self, tab: &str) -> bool {
        self.active_tab == tab
    }
}

/// One `<option>` of a select box.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// An expense as shown in the record and drill-down lists.
#[derive(Debug, Clone)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub item: String,
    pub category: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub paid_by: &'static str,
    pub price_display: String,
    pub notes: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            date: e.date_str(),
            item: e.item.clone(),
            category: e.category.name(),
            color: e.category.color(),
            icon: e.category.icon(),
            paid_by: e.paid_by.name(),
            price_display: e.price_display(),
            notes: e.notes.clone(),
        }
    }
}

pub fn expense_rows(expenses: &[Expense]) -> Vec<ExpenseRow> {
    expenses.iter().map(ExpenseRow::from).collect()
}

/// Category choices for the entry form, with the draft's value selected.
pub fn draft_category_options(draft: &ExpenseDraft) -> Vec<SelectOption> {
    Category::all()
        .iter()
        .map(|c| {
            SelectOption::new(
                c.name(),
                format!("{} {}", c.icon(), c.name()),
                draft.is_category(c),
            )
        })
        .collect()
}

pub fn draft_payer_options(draft: &ExpenseDraft) -> Vec<SelectOption> {
    Payer::ALL
        .iter()
        .map(|p| SelectOption::new(p.name(), p.name(), draft.is_payer(p)))
        .collect()
}

/// "1 record" / "10 records".
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(1, "record"), "1 record");
        assert_eq!(count_label(0, "record"), "0 records");
        assert_eq!(count_label(10, "transaction"), "10 transactions");
    }

    #[test]
    fn test_draft_options_select_current_values() {
        let mut draft = ExpenseDraft::blank(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        draft.category = "Bills".into();
        draft.paid_by = "Shared".into();

        let categories = draft_category_options(&draft);
        assert_eq!(categories.len(), 6);
        let selected: Vec<_> = categories.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Bills");

        let payers = draft_payer_options(&draft);
        assert_eq!(payers.iter().filter(|o| o.selected).count(), 1);
        assert!(payers[2].selected);
    }

    #[test]
    fn test_layout_tab() {
        let store = ExpenseStore::with_sample_data();
        let layout = Layout::new("Dashboard", "dashboard", &store);
        assert!(layout.is_tab("dashboard"));
        assert!(!layout.is_tab("records"));
        assert_eq!(layout.all_time_display, "S$556.57");
    }
}
