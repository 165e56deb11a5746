use std::str::FromStr;

use crate::date_utils::MonthSelection;
use crate::models::{Category, Expense};
use crate::sort_utils::{ExpenseSortColumn, SortDirection, TableSort};

/// Category filter: either every category or one specific category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Only(Category),
}

impl CategorySelection {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(c) => c.name(),
        }
    }
}

impl FromStr for CategorySelection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse::<Category>().map(Self::Only)
        }
    }
}

/// Month, category and search-text criteria for the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub month: MonthSelection,
    pub category: CategorySelection,
    pub search: String,
}

impl ExpenseFilter {
    /// A filter that lets every record through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.matches(expense.date)
            && self.category.matches(expense.category)
            && (self.search.is_empty()
                || expense
                    .item
                    .to_lowercase()
                    .contains(&self.search.to_lowercase()))
    }

    /// Records matching every criterion, in input order.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

/// What a drill-down panel lists: the whole month or one category of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillTarget {
    All,
    Category(Category),
}

impl DrillTarget {
    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Category(c) => c.name(),
        }
    }
}

impl FromStr for DrillTarget {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<CategorySelection>()? {
            CategorySelection::All => Ok(Self::All),
            CategorySelection::Only(c) => Ok(Self::Category(c)),
        }
    }
}

/// Records behind a drill-down: everything in the selected month (the
/// category filter and search text do not apply), narrowed to the target
/// category, newest first.
pub fn drilldown_items(
    expenses: &[Expense],
    month: MonthSelection,
    target: DrillTarget,
) -> Vec<Expense> {
    let category = match target {
        DrillTarget::All => CategorySelection::All,
        DrillTarget::Category(c) => CategorySelection::Only(c),
    };
    let filter = ExpenseFilter {
        month,
        category,
        search: String::new(),
    };
    TableSort::new(ExpenseSortColumn::Date, SortDirection::Desc).apply(&filter.apply(expenses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_utils::YearMonth;
    use crate::store::sample::sample_expenses;

    fn feb() -> MonthSelection {
        MonthSelection::Month(YearMonth::new(2025, 2).unwrap())
    }

    #[test]
    fn test_all_filter_returns_everything_in_order() {
        let expenses = sample_expenses();
        assert_eq!(ExpenseFilter::all().apply(&expenses), expenses);
    }

    #[test]
    fn test_empty_input() {
        assert!(ExpenseFilter::all().apply(&[]).is_empty());
    }

    #[test]
    fn test_month_filter() {
        let expenses = sample_expenses();
        let filter = ExpenseFilter {
            month: feb(),
            ..Default::default()
        };
        let result = filter.apply(&expenses);
        assert_eq!(result.len(), 10);
        assert_eq!(result.iter().map(|e| e.price_cents).sum::<i64>(), 38468);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[9].id, 10);
    }

    #[test]
    fn test_category_and_search_combine() {
        let expenses = sample_expenses();
        let filter = ExpenseFilter {
            month: MonthSelection::All,
            category: CategorySelection::Only(Category::Bills),
            search: "BILL".into(),
        };
        let ids: Vec<i64> = filter.apply(&expenses).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 15]);
    }

    #[test]
    fn test_every_result_matches_and_comes_from_input() {
        let expenses = sample_expenses();
        let filter = ExpenseFilter {
            month: feb(),
            category: CategorySelection::Only(Category::Transport),
            search: "r".into(),
        };
        for e in filter.apply(&expenses) {
            assert!(filter.matches(&e));
            assert!(expenses.contains(&e));
        }
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All".parse(), Ok(CategorySelection::All));
        assert_eq!("Bills".parse(), Ok(CategorySelection::Only(Category::Bills)));
        assert!("Pets".parse::<CategorySelection>().is_err());
        assert_eq!("Food".parse(), Ok(DrillTarget::Category(Category::Food)));
        assert_eq!("all".parse(), Ok(DrillTarget::All));
    }

    #[test]
    fn test_drilldown_ignores_search_and_sorts_newest_first() {
        let expenses = sample_expenses();
        let items = drilldown_items(&expenses, feb(), DrillTarget::Category(Category::Food));
        let ids: Vec<i64> = items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 6, 1]);

        let all = drilldown_items(&expenses, MonthSelection::All, DrillTarget::All);
        assert_eq!(all.len(), 15);
        assert_eq!(all[0].id, 10);
    }
}
