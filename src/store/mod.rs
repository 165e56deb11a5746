//! In-memory record store.
//!
//! Holds every expense for the lifetime of the process. Nothing is persisted;
//! a fresh process starts from the sample dataset or from empty.

pub mod sample;

use tracing::{debug, info, trace};

use crate::date_utils::YearMonth;
use crate::models::{Expense, ExpenseDraft, ValidationError};

#[derive(Debug, Clone)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: i64,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from existing records. Identifiers handed out later
    /// start above the largest one present.
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let next_id = expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self { expenses, next_id }
    }

    pub fn with_sample_data() -> Self {
        Self::with_expenses(sample::sample_expenses())
    }

    /// Every record, in insertion order.
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_cents(&self) -> i64 {
        self.expenses.iter().map(|e| e.price_cents).sum()
    }

    /// Distinct months that have at least one record, newest first.
    pub fn months(&self) -> Vec<YearMonth> {
        let mut months: Vec<YearMonth> = self.expenses.iter().map(|e| e.year_month()).collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();
        months
    }

    /// Validate `draft` and append it with a fresh identifier.
    pub fn create(&mut self, draft: &ExpenseDraft) -> Result<&Expense, ValidationError> {
        let new = draft.validate()?;
        let id = self.next_id;
        self.next_id += 1;

        trace!(expense_id = id, item = %new.item, price_cents = new.price_cents, "Inserting expense");
        self.expenses.push(Expense::from_new(id, new));
        info!(expense_id = id, count = self.expenses.len(), "Expense created");

        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Validate `draft` and replace the record with `id`, keeping its
    /// identifier. Returns `Ok(false)` when no such record exists.
    pub fn update(&mut self, id: i64, draft: &ExpenseDraft) -> Result<bool, ValidationError> {
        let new = draft.validate()?;
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => {
                *expense = Expense::from_new(id, new);
                info!(expense_id = id, "Expense updated");
                Ok(true)
            }
            None => {
                debug!(expense_id = id, "Update skipped, no such expense");
                Ok(false)
            }
        }
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            info!(expense_id = id, count = self.expenses.len(), "Expense deleted");
        } else {
            debug!(expense_id = id, "Delete skipped, no such expense");
        }
        removed
    }
}
