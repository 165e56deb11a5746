//! Geometry for the server-rendered charts: bar widths and donut slices.

use std::f64::consts::PI;

use crate::filters::{format_money, format_percent};
use crate::models::Category;

const DEFAULT_BAR_COLOR: &str = "#45B7D1";

pub const DONUT_SIZE: f64 = 160.0;
const DONUT_RADIUS: f64 = 55.0;
const DONUT_CENTER: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct BarRow {
    pub label: String,
    pub value_cents: i64,
    pub value_display: String,
    /// Bar length relative to the largest value, 0–100.
    pub width_percent: f64,
    pub color: String,
    /// Drill-down link; bars with no value are never clickable.
    pub href: Option<String>,
}

impl BarRow {
    pub fn has_value(&self) -> bool {
        self.value_cents > 0
    }

    pub fn link(&self) -> &str {
        self.href.as_deref().unwrap_or("")
    }

    pub fn width_style(&self) -> String {
        format!("width: {:.2}%; background: {}", self.width_percent, self.color)
    }
}

/// One input bar: label, value, colour and optional link.
pub struct BarInput {
    pub label: String,
    pub value_cents: i64,
    pub color: Option<&'static str>,
    pub href: Option<String>,
}

/// Scale bars against the largest value (at least one cent, so an all-zero
/// chart renders empty bars instead of dividing by zero).
pub fn bar_rows(inputs: Vec<BarInput>) -> Vec<BarRow> {
    let max = inputs.iter().map(|b| b.value_cents).max().unwrap_or(0).max(1);
    inputs
        .into_iter()
        .map(|b| BarRow {
            width_percent: (b.value_cents.max(0) as f64 / max as f64) * 100.0,
            value_display: format_money(b.value_cents),
            color: b.color.unwrap_or(DEFAULT_BAR_COLOR).to_string(),
            href: b.href.filter(|_| b.value_cents > 0),
            label: b.label,
            value_cents: b.value_cents,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct DonutSlice {
    pub category: Category,
    pub color: &'static str,
    pub path: String,
    pub value_cents: i64,
    pub percent_display: String,
    pub href: String,
}

impl DonutSlice {
    pub fn has_value(&self) -> bool {
        self.value_cents > 0
    }

    pub fn value_display(&self) -> String {
        format_money(self.value_cents)
    }
}

/// Build SVG pie paths for category totals, starting at 12 o'clock and going
/// clockwise. Returns no slices when the total is zero. `href_for` produces
/// the drill-down link of each category.
pub fn donut_slices(
    totals: &[(Category, i64)],
    href_for: impl Fn(Category) -> String,
) -> Vec<DonutSlice> {
    let total: i64 = totals.iter().map(|(_, v)| (*v).max(0)).sum();
    if total <= 0 {
        return Vec::new();
    }

    let (cx, cy, r) = (DONUT_CENTER, DONUT_CENTER, DONUT_RADIUS);
    let mut cumulative = 0i64;

    totals
        .iter()
        .map(|&(category, value)| {
            let value = value.max(0);
            let start = (cumulative as f64 / total as f64) * 2.0 * PI - PI / 2.0;
            cumulative += value;
            let end = (cumulative as f64 / total as f64) * 2.0 * PI - PI / 2.0;

            let path = if value == total {
                // A single arc cannot start and end on the same point.
                format!(
                    "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
                    cx = cx,
                    r = r,
                    top = cy - r,
                    bottom = cy + r
                )
            } else {
                let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
                let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
                let large_arc = if end - start > PI { 1 } else { 0 };
                format!(
                    "M {} {} L {:.3} {:.3} A {} {} 0 {} 1 {:.3} {:.3} Z",
                    cx, cy, x1, y1, r, r, large_arc, x2, y2
                )
            };

            DonutSlice {
                category,
                color: category.color(),
                path,
                value_cents: value,
                percent_display: format_percent(value as f64 / total as f64 * 100.0),
                href: href_for(category),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str, cents: i64) -> BarInput {
        BarInput {
            label: label.into(),
            value_cents: cents,
            color: None,
            href: Some(format!("/?drill={}", label)),
        }
    }

    #[test]
    fn test_bars_scale_to_largest() {
        let rows = bar_rows(vec![bar("a", 500), bar("b", 1000), bar("c", 0)]);
        assert_eq!(rows[0].width_percent, 50.0);
        assert_eq!(rows[1].width_percent, 100.0);
        assert_eq!(rows[2].width_percent, 0.0);
        assert_eq!(rows[1].value_display, "S$10.00");
        assert_eq!(rows[0].color, DEFAULT_BAR_COLOR);
    }

    #[test]
    fn test_empty_bars_have_no_link() {
        let rows = bar_rows(vec![bar("a", 0)]);
        assert!(rows[0].href.is_none());
        assert!(!rows[0].has_value());
        assert_eq!(rows[0].width_percent, 0.0);
    }

    #[test]
    fn test_donut_empty_when_no_spend() {
        let slices = donut_slices(&[(Category::Food, 0)], |_| String::new());
        assert!(slices.is_empty());
    }

    #[test]
    fn test_donut_percentages() {
        let slices = donut_slices(
            &[(Category::Food, 300), (Category::Bills, 100), (Category::Others, 0)],
            |c| format!("/?drill={}", c.name()),
        );
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].percent_display, "75.0%");
        assert_eq!(slices[1].percent_display, "25.0%");
        assert!(!slices[2].has_value());
        assert_eq!(slices[1].href, "/?drill=Bills");
        // Food covers more than half the circle
        assert!(slices[0].path.contains(" 0 1 1 "));
        assert!(slices[1].path.contains(" 0 0 1 "));
    }

    #[test]
    fn test_donut_single_category_draws_full_circle() {
        let slices = donut_slices(&[(Category::Food, 100), (Category::Bills, 0)], |_| {
            String::new()
        });
        assert_eq!(slices[0].percent_display, "100.0%");
        assert!(slices[0].path.starts_with("M 80 25 A 55 55"));
    }
}
