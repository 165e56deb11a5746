use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date_utils::MonthSelection;
use crate::error::AppError;
use crate::filters::format_amount;
use crate::models::Expense;

/// One exported line. Field renames are the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Price (SGD)")]
    pub price: String,
    #[serde(rename = "Paid By")]
    pub paid_by: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl From<&Expense> for ExportRow {
    fn from(e: &Expense) -> Self {
        Self {
            date: e.date_str(),
            item: e.item.clone(),
            category: e.category.name().to_string(),
            price: format_amount(e.price_cents),
            paid_by: e.paid_by.name().to_string(),
            notes: e.notes.clone(),
        }
    }
}

pub const CRLF: &str = "\r\n";

/// Serialize `expenses` in the given order. Every field is quoted, quotes are
/// doubled and rows are joined by CRLF with no trailing line break.
pub fn export_csv(expenses: &[Expense]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    for expense in expenses {
        writer.serialize(ExportRow::from(expense))?;
    }
    if expenses.is_empty() {
        // serialize() writes the header lazily, so emit it by hand
        writer.write_record(export_header())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;
    let mut out =
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))?;
    if out.ends_with(CRLF) {
        out.truncate(out.len() - CRLF.len());
    }

    debug!(rows = expenses.len(), bytes = out.len(), "Exported CSV");
    Ok(out)
}

pub fn export_header() -> [&'static str; 6] {
    ["Date", "Item", "Category", "Price (SGD)", "Paid By", "Notes"]
}

/// Read back a document produced by [`export_csv`].
pub fn parse_csv(content: &str) -> Result<Vec<ExportRow>, AppError> {
    trace!(content_size = content.len(), "Parsing exported CSV");
    let mut reader = csv::ReaderBuilder::new().from_reader(content.as_bytes());

    let rows = reader
        .deserialize::<ExportRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Download name: `expenses_<YYYY-MM>.csv` or `expenses_all.csv`.
pub fn export_filename(month: &MonthSelection) -> String {
    format!("expenses_{}.csv", month.file_suffix())
}
