//! Fixed names and thresholds shared across the pipeline.

/// Source table holding raw book rows.
pub const SOURCE_TABLE: &str = "books";

/// Destination table receiving processed rows.
pub const DEST_TABLE: &str = "books_processed";

/// Calendar format accepted for the cutoff-date argument.
pub const CUTOFF_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounded prices strictly below this value are "budget"; everything else is "premium".
pub const BUDGET_PRICE_CEILING: i64 = 500;

/// Decimal places kept on the rounded price.
pub const ROUNDED_PRICE_SCALE: u32 = 1;
