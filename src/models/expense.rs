use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date_utils::YearMonth;
use crate::filters;
use crate::models::category::Category;

/// Who paid for an expense.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payer {
    #[default]
    Me,
    #[serde(rename = "Fiancée")]
    Fiancee,
    Shared,
}

impl Payer {
    pub const ALL: [Payer; 3] = [Self::Me, Self::Fiancee, Self::Shared];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Me => "Me",
            Self::Fiancee => "Fiancée",
            Self::Shared => "Shared",
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Payer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Me" => Ok(Self::Me),
            // Accept the unaccented spelling some keyboards produce.
            "Fiancée" | "Fiancee" => Ok(Self::Fiancee),
            "Shared" => Ok(Self::Shared),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub item: String,
    pub category: Category,
    pub price_cents: i64,
    pub paid_by: Payer,
    #[serde(default)]
    pub notes: String,
}

impl Expense {
    pub fn from_new(id: i64, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            item: new.item,
            category: new.category,
            price_cents: new.price_cents,
            paid_by: new.paid_by,
            notes: new.notes,
        }
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Price formatted as `S$` with two decimals.
    pub fn price_display(&self) -> String {
        filters::format_money(self.price_cents)
    }
}

/// A validated expense that does not have an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub item: String,
    pub category: Category,
    pub price_cents: i64,
    pub paid_by: Payer,
    pub notes: String,
}

/// Reasons a draft is rejected. Variants are checked in declaration order and
/// only the first failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an item name.")]
    MissingItem,
    #[error("Please enter a valid price.")]
    InvalidPrice,
    #[error("Please select a date.")]
    MissingDate,
    #[error("Please enter a valid date.")]
    InvalidDate,
    #[error("Please choose a valid category.")]
    InvalidCategory,
    #[error("Please choose who paid.")]
    InvalidPayer,
}

impl ValidationError {
    /// Name of the form field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingItem => "item",
            Self::InvalidPrice => "price",
            Self::MissingDate | Self::InvalidDate => "date",
            Self::InvalidCategory => "category",
            Self::InvalidPayer => "paid_by",
        }
    }
}

/// Uncommitted form state for the add/edit form. Every field is kept as the
/// raw submitted text so a rejected draft can be shown back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub paid_by: String,
    #[serde(default)]
    pub notes: String,
}

impl ExpenseDraft {
    /// A blank draft dated `today`, defaulting to Food paid by Me.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            category: Category::default().name().to_string(),
            paid_by: Payer::default().name().to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<NewExpense, ValidationError> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err(ValidationError::MissingItem);
        }

        let price_cents = parse_price_cents(&self.price).ok_or(ValidationError::InvalidPrice)?;

        let date_str = self.date.trim();
        if date_str.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;

        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| ValidationError::InvalidCategory)?;
        let paid_by = self
            .paid_by
            .parse::<Payer>()
            .map_err(|_| ValidationError::InvalidPayer)?;

        Ok(NewExpense {
            date,
            item: item.to_string(),
            category,
            price_cents,
            paid_by,
            notes: self.notes.trim().to_string(),
        })
    }

    pub fn is_category(&self, category: &Category) -> bool {
        self.category == category.name()
    }

    pub fn is_payer(&self, payer: &Payer) -> bool {
        self.paid_by == payer.name()
    }
}

impl From<&Expense> for ExpenseDraft {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date_str(),
            item: expense.item.clone(),
            price: filters::format_amount(expense.price_cents),
            category: expense.category.name().to_string(),
            paid_by: expense.paid_by.name().to_string(),
            notes: expense.notes.clone(),
        }
    }
}

/// Largest accepted price: S$10,000,000,000.00. Keeps store-wide sums far
/// from `i64` overflow.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Parse a user-entered price into whole cents. Rejects non-numbers,
/// non-finite values, anything that does not round to at least one cent and
/// anything above [`MAX_PRICE_CENTS`].
pub fn parse_price_cents(input: &str) -> Option<i64> {
    let amount: f64 = input.trim().parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents > MAX_PRICE_CENTS as f64 {
        return None;
    }
    Some(cents as i64)
}
