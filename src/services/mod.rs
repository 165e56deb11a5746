pub mod analytics;
pub mod charts;
pub mod csv_export;
pub mod filter;
