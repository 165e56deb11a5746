use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_utils::{week_start, YearMonth};
use crate::filters::format_money;
use crate::models::{Category, Expense};

/// Label shown when a category has no records.
pub const NO_ENTRY_LABEL: &str = "\u{2014}";

#[derive(Debug, Clone, Serialize)]
pub struct SpendingSummary {
    pub total_cents: i64,
    pub expense_count: usize,
    pub average_cents: i64,
    pub highest: Option<Expense>,
}

impl SpendingSummary {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        if expenses.is_empty() {
            return Self {
                total_cents: 0,
                expense_count: 0,
                average_cents: 0,
                highest: None,
            };
        }

        let total_cents: i64 = expenses.iter().map(|e| e.price_cents).sum();
        let expense_count = expenses.len();

        Self {
            total_cents,
            expense_count,
            average_cents: total_cents / expense_count as i64,
            highest: highest_expense(expenses).cloned(),
        }
    }

    pub fn total_display(&self) -> String {
        format_money(self.total_cents)
    }

    pub fn highest_display(&self) -> String {
        format_money(self.highest.as_ref().map_or(0, |e| e.price_cents))
    }

    pub fn highest_item(&self) -> &str {
        self.highest.as_ref().map_or(NO_ENTRY_LABEL, |e| e.item.as_str())
    }
}

/// The most expensive record; on ties the first one encountered wins.
pub fn highest_expense(expenses: &[Expense]) -> Option<&Expense> {
    expenses.iter().fold(None, |best: Option<&Expense>, e| match best {
        Some(b) if e.price_cents <= b.price_cents => Some(b),
        _ => Some(e),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_cents: i64,
    pub expense_count: usize,
}

/// Sum per category, for all six categories in their fixed order.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    Category::ALL
        .iter()
        .map(|&category| {
            let (total_cents, expense_count) = expenses
                .iter()
                .filter(|e| e.category == category)
                .fold((0i64, 0usize), |(sum, n), e| (sum + e.price_cents, n + 1));
            CategoryTotal {
                category,
                total_cents,
                expense_count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMax {
    pub category: Category,
    pub top: Option<Expense>,
}

impl CategoryMax {
    /// Price of the top record, 0 when the category is empty.
    pub fn value_cents(&self) -> i64 {
        self.top.as_ref().map_or(0, |e| e.price_cents)
    }

    /// Item of the top record, "—" when the category is empty.
    pub fn label(&self) -> &str {
        self.top.as_ref().map_or(NO_ENTRY_LABEL, |e| e.item.as_str())
    }
}

/// Highest-priced record per category, for all six categories.
pub fn category_maxima(expenses: &[Expense]) -> Vec<CategoryMax> {
    Category::ALL
        .iter()
        .map(|&category| {
            let in_category: Vec<Expense> = expenses
                .iter()
                .filter(|e| e.category == category)
                .cloned()
                .collect();
            CategoryMax {
                category,
                top: highest_expense(&in_category).cloned(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTotal {
    pub week_start: NaiveDate,
    pub total_cents: i64,
}

impl WeeklyTotal {
    pub fn label(&self) -> String {
        format!("Wk {}", self.week_start.format("%Y-%m-%d"))
    }
}

/// Sum per Monday-start week, oldest week first.
pub fn weekly_totals(expenses: &[Expense]) -> Vec<WeeklyTotal> {
    let mut weeks: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for expense in expenses {
        *weeks.entry(week_start(expense.date)).or_insert(0) += expense.price_cents;
    }
    weeks
        .into_iter()
        .map(|(week_start, total_cents)| WeeklyTotal {
            week_start,
            total_cents,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub label: String,
    pub total_cents: i64,
}

/// Sum per calendar month, oldest first. Callers pass the whole store here,
/// not the month-filtered set, since this feeds the trend chart.
pub fn monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<YearMonth, i64> = BTreeMap::new();
    for expense in expenses {
        *months.entry(expense.year_month()).or_insert(0) += expense.price_cents;
    }
    months
        .into_iter()
        .map(|(month, total_cents)| MonthlyTotal {
            month,
            label: month.short_label(),
            total_cents,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub category: Category,
    /// One cell per entry of [`CategoryMonthMatrix::months`].
    pub cells: Vec<i64>,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryMonthMatrix {
    /// Column order, newest month first.
    pub months: Vec<YearMonth>,
    pub rows: Vec<MatrixRow>,
    pub column_totals: Vec<i64>,
    pub grand_total_cents: i64,
}

/// Cross-tabulate spend by category and month over every month present in
/// `expenses`.
pub fn category_month_matrix(expenses: &[Expense]) -> CategoryMonthMatrix {
    let mut months: Vec<YearMonth> = expenses.iter().map(|e| e.year_month()).collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();

    let mut sums: BTreeMap<(Category, YearMonth), i64> = BTreeMap::new();
    for expense in expenses {
        *sums
            .entry((expense.category, expense.year_month()))
            .or_insert(0) += expense.price_cents;
    }

    let rows: Vec<MatrixRow> = Category::ALL
        .iter()
        .map(|&category| {
            let cells: Vec<i64> = months
                .iter()
                .map(|m| sums.get(&(category, *m)).copied().unwrap_or(0))
                .collect();
            let total_cents = cells.iter().sum();
            MatrixRow {
                category,
                cells,
                total_cents,
            }
        })
        .collect();

    let column_totals: Vec<i64> = (0..months.len())
        .map(|i| rows.iter().map(|r| r.cells[i]).sum())
        .collect();
    let grand_total_cents = column_totals.iter().sum();

    CategoryMonthMatrix {
        months,
        rows,
        column_totals,
        grand_total_cents,
    }
}
