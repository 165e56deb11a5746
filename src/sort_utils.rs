use std::cmp::Ordering;

use crate::models::Expense;

/// Sort direction for list columns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "\u{2191}",
            Self::Desc => "\u{2193}",
        }
    }
}

/// Trait for column enums. Each sortable list defines its own column enum
/// implementing this trait.
pub trait SortableColumn: Sized + Default + Copy + PartialEq + 'static {
    type Row;

    /// Parse column name from a query string value.
    fn from_str(s: &str) -> Option<Self>;

    /// Convert column to its query string value.
    fn as_str(&self) -> &'static str;

    /// Human-readable column name.
    fn label(&self) -> &'static str;

    /// Ascending comparison of two rows on this column.
    fn compare(&self, a: &Self::Row, b: &Self::Row) -> Ordering;

    fn all() -> &'static [Self];
}

/// Trait for filter params that support sorting.
pub trait Sortable {
    fn sort_key(&self) -> Option<&String>;

    /// Resolve the `sort` parameter (e.g. `price-asc`) into a TableSort.
    /// Unknown values fall back to the default sort.
    fn resolve_sort<C: SortableColumn>(&self) -> TableSort<C> {
        self.sort_key()
            .and_then(|s| TableSort::parse(s))
            .unwrap_or_default()
    }
}

/// Sort configuration passed to templates and the list pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSort<C: SortableColumn> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: SortableColumn> TableSort<C> {
    pub fn new(column: C, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Parse a `<column>-<direction>` key such as `date-desc`.
    pub fn parse(key: &str) -> Option<Self> {
        let (column, direction) = key.trim().rsplit_once('-')?;
        Some(Self {
            column: C::from_str(column)?,
            direction: SortDirection::from_str(direction)?,
        })
    }

    /// The `<column>-<direction>` key for this sort.
    pub fn key(&self) -> String {
        format!("{}-{}", self.column.as_str(), self.direction.as_str())
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.column.label(), self.direction.arrow())
    }

    /// Return a sorted copy of `rows`. The sort is stable, so rows with equal
    /// keys keep their input order in both directions.
    pub fn apply(&self, rows: &[C::Row]) -> Vec<C::Row>
    where
        C::Row: Clone,
    {
        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| match self.direction {
            SortDirection::Asc => self.column.compare(a, b),
            SortDirection::Desc => self.column.compare(b, a),
        });
        sorted
    }

    /// Every column/direction combination, in menu order.
    pub fn options() -> Vec<Self> {
        C::all()
            .iter()
            .flat_map(|c| {
                [SortDirection::Desc, SortDirection::Asc]
                    .into_iter()
                    .map(move |d| Self::new(*c, d))
            })
            .collect()
    }
}

impl<C: SortableColumn> Default for TableSort<C> {
    fn default() -> Self {
        Self {
            column: C::default(),
            direction: SortDirection::default(),
        }
    }
}

/// Sortable columns for the expense list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSortColumn {
    #[default]
    Date,
    Price,
}

impl SortableColumn for ExpenseSortColumn {
    type Row = Expense;

    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Price => "price",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Price => "Price",
        }
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            // NaiveDate orders the same as its zero-padded ISO string.
            Self::Date => a.date.cmp(&b.date),
            Self::Price => a.price_cents.cmp(&b.price_cents),
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Date, Self::Price]
    }
}

pub type ExpenseSort = TableSort<ExpenseSortColumn>;
