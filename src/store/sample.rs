use chrono::NaiveDate;

use crate::models::{Category, Expense, Payer};

const SAMPLE: &[(i64, &str, &str, Category, i64, Payer)] = &[
    (1, "2025-02-01", "Chicken Rice", Category::Food, 550, Payer::Me),
    (2, "2025-02-02", "MRT Top Up", Category::Transport, 2000, Payer::Fiancee),
    (3, "2025-02-03", "NTUC Groceries", Category::Shopping, 6230, Payer::Me),
    (4, "2025-02-05", "Netflix", Category::Bills, 1798, Payer::Me),
    (5, "2025-02-07", "Grab Ride", Category::Transport, 1400, Payer::Fiancee),
    (6, "2025-02-08", "Kopitiam Lunch", Category::Food, 750, Payer::Me),
    (7, "2025-02-10", "Electricity Bill", Category::Bills, 8900, Payer::Me),
    (8, "2025-02-12", "Zara Top", Category::Shopping, 4590, Payer::Fiancee),
    (9, "2025-02-14", "Valentine Dinner", Category::Food, 12000, Payer::Me),
    (10, "2025-02-15", "Bus Fare", Category::Transport, 250, Payer::Fiancee),
    (11, "2025-01-05", "Hawker Dinner", Category::Food, 1200, Payer::Me),
    (12, "2025-01-10", "Spotify", Category::Bills, 999, Payer::Fiancee),
    (13, "2025-01-15", "Uniqlo Jacket", Category::Shopping, 7990, Payer::Me),
    (14, "2025-01-20", "Taxi to Airport", Category::Transport, 3800, Payer::Me),
    (15, "2025-01-25", "Water Bill", Category::Bills, 3200, Payer::Fiancee),
];

/// The dataset every fresh session starts with.
pub fn sample_expenses() -> Vec<Expense> {
    SAMPLE
        .iter()
        .filter_map(|&(id, date, item, category, price_cents, paid_by)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(Expense {
                id,
                date,
                item: item.to_string(),
                category,
                price_cents,
                paid_by,
                notes: String::new(),
            })
        })
        .collect()
}
