pub mod category;
pub mod expense;

pub use category::Category;
pub use expense::{parse_price_cents, Expense, ExpenseDraft, NewExpense, Payer, ValidationError};
