use serde::Deserialize;

use crate::date_utils::{MonthFilterable, MonthSelection, YearMonth};
use crate::handlers::views::SelectOption;
use crate::models::Category;
use crate::services::filter::{CategorySelection, DrillTarget, ExpenseFilter};
use crate::sort_utils::{ExpenseSort, Sortable};

/// Raw selection query parameters shared by the pages and the JSON API.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SelectionParams {
    pub month: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub drill: Option<String>,
    pub view: Option<String>,
}

impl MonthFilterable for SelectionParams {
    fn month(&self) -> Option<&String> {
        self.month.as_ref()
    }
}

impl Sortable for SelectionParams {
    fn sort_key(&self) -> Option<&String> {
        self.sort.as_ref()
    }
}

impl SelectionParams {
    /// Resolve every parameter, falling back to defaults for missing or
    /// invalid values.
    pub fn resolve(&self, available_months: &[YearMonth]) -> Selection {
        Selection {
            month: self.resolve_month(available_months),
            category: self
                .category
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or_default(),
            search: self.search.as_deref().unwrap_or("").trim().to_string(),
            sort: self.resolve_sort(),
            drill: self.drill.as_deref().and_then(|d| d.parse().ok()),
            view: self
                .view
                .as_deref()
                .and_then(InsightsView::from_str)
                .unwrap_or_default(),
        }
    }
}

/// Which trend the insights page shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InsightsView {
    #[default]
    Monthly,
    Weekly,
}

impl InsightsView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

/// The resolved view selection for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub month: MonthSelection,
    pub category: CategorySelection,
    pub search: String,
    pub sort: ExpenseSort,
    pub drill: Option<DrillTarget>,
    pub view: InsightsView,
}

impl Selection {
    pub fn filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            month: self.month,
            category: self.category,
            search: self.search.clone(),
        }
    }

    /// Query string carrying month, category, search and sort. Search and
    /// sort are left out when they hold their defaults.
    pub fn query_string(&self) -> String {
        let mut parts = vec![
            format!("month={}", urlencoding::encode(&self.month.key())),
            format!("category={}", urlencoding::encode(self.category.key())),
        ];
        if !self.search.is_empty() {
            parts.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if self.sort != ExpenseSort::default() {
            parts.push(format!("sort={}", self.sort.key()));
        }
        parts.join("&")
    }

    /// Dashboard link that opens the drill-down panel for `target`.
    pub fn drill_href(&self, target: DrillTarget) -> String {
        format!(
            "/?month={}&category={}&drill={}",
            urlencoding::encode(&self.month.key()),
            urlencoding::encode(self.category.key()),
            urlencoding::encode(target.key())
        )
    }

    /// Dashboard link with the drill-down panel closed.
    pub fn dashboard_href(&self) -> String {
        format!(
            "/?month={}&category={}",
            urlencoding::encode(&self.month.key()),
            urlencoding::encode(self.category.key())
        )
    }

    pub fn records_href(&self) -> String {
        format!("/records?{}", self.query_string())
    }

    pub fn export_href(&self) -> String {
        format!("/records/export?{}", self.query_string())
    }

    pub fn insights_href(&self, view: InsightsView) -> String {
        format!(
            "/insights?view={}&month={}",
            view.as_str(),
            urlencoding::encode(&self.month.key())
        )
    }

    /// "All Time" followed by every month with data, newest first.
    pub fn month_options(&self, months: &[YearMonth]) -> Vec<SelectOption> {
        std::iter::once(SelectOption::new(
            MonthSelection::All.key(),
            MonthSelection::All.label(),
            self.month == MonthSelection::All,
        ))
        .chain(months.iter().map(|m| {
            let selection = MonthSelection::Month(*m);
            SelectOption::new(selection.key(), selection.label(), self.month == selection)
        }))
        .collect()
    }

    pub fn category_options(&self, all_label: &str) -> Vec<SelectOption> {
        std::iter::once(SelectOption::new(
            CategorySelection::All.key(),
            all_label,
            self.category == CategorySelection::All,
        ))
        .chain(Category::all().iter().map(|c| {
            SelectOption::new(
                c.name(),
                c.name(),
                self.category == CategorySelection::Only(*c),
            )
        }))
        .collect()
    }

    pub fn sort_options(&self) -> Vec<SelectOption> {
        ExpenseSort::options()
            .into_iter()
            .map(|s| SelectOption::new(s.key(), s.label(), s == self.sort))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort_utils::{ExpenseSortColumn, SortDirection};

    fn months() -> Vec<YearMonth> {
        vec![YearMonth::new(2025, 2).unwrap(), YearMonth::new(2025, 1).unwrap()]
    }

    #[test]
    fn test_defaults() {
        let selection = SelectionParams::default().resolve(&months());
        assert_eq!(
            selection.month,
            MonthSelection::Month(YearMonth::new(2025, 2).unwrap())
        );
        assert_eq!(selection.category, CategorySelection::All);
        assert_eq!(selection.search, "");
        assert_eq!(selection.sort, ExpenseSort::default());
        assert_eq!(selection.drill, None);
        assert_eq!(selection.view, InsightsView::Monthly);
    }

    #[test]
    fn test_defaults_without_data() {
        let selection = SelectionParams::default().resolve(&[]);
        assert_eq!(selection.month, MonthSelection::All);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let params = SelectionParams {
            month: Some("2025-13".into()),
            category: Some("Groceries".into()),
            sort: Some("name-up".into()),
            drill: Some("nope".into()),
            view: Some("daily".into()),
            ..Default::default()
        };
        let selection = params.resolve(&months());
        assert_eq!(
            selection.month,
            MonthSelection::Month(YearMonth::new(2025, 2).unwrap())
        );
        assert_eq!(selection.category, CategorySelection::All);
        assert_eq!(selection.sort, ExpenseSort::default());
        assert_eq!(selection.drill, None);
        assert_eq!(selection.view, InsightsView::Monthly);
    }

    #[test]
    fn test_explicit_values() {
        let params = SelectionParams {
            month: Some("All".into()),
            category: Some("Skincare & Necessities".into()),
            search: Some("  Zara ".into()),
            sort: Some("price-asc".into()),
            drill: Some("Bills".into()),
            view: Some("weekly".into()),
        };
        let selection = params.resolve(&months());
        assert_eq!(selection.month, MonthSelection::All);
        assert_eq!(
            selection.category,
            CategorySelection::Only(Category::SkincareNecessities)
        );
        assert_eq!(selection.search, "Zara");
        assert_eq!(
            selection.sort,
            ExpenseSort::new(ExpenseSortColumn::Price, SortDirection::Asc)
        );
        assert_eq!(selection.drill, Some(DrillTarget::Category(Category::Bills)));
        assert_eq!(selection.view, InsightsView::Weekly);
    }

    #[test]
    fn test_query_string_encodes_values() {
        let params = SelectionParams {
            month: Some("2025-01".into()),
            category: Some("Skincare & Necessities".into()),
            search: Some("kopi o".into()),
            sort: Some("price-desc".into()),
            ..Default::default()
        };
        let selection = params.resolve(&months());
        assert_eq!(
            selection.query_string(),
            "month=2025-01&category=Skincare%20%26%20Necessities&search=kopi%20o&sort=price-desc"
        );
        assert_eq!(
            selection.drill_href(DrillTarget::All),
            "/?month=2025-01&category=Skincare%20%26%20Necessities&drill=All"
        );
    }

    #[test]
    fn test_month_options_mark_selection() {
        let selection = SelectionParams::default().resolve(&months());
        let options = selection.month_options(&months());
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "All Time");
        assert_eq!(options[1].value, "2025-02");
        assert_eq!(options[1].label, "February 2025");
        assert!(options[1].selected);
        assert!(!options[0].selected);
    }

    #[test]
    fn test_sort_options() {
        let selection = SelectionParams::default().resolve(&months());
        let options = selection.sort_options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, "date-desc");
        assert!(options[0].selected);
    }
}
