use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row read from the source `books` table, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBookRecord {
    pub book_id: i32,
    pub title: String,
    pub price: Decimal,
    pub genre: String,
    pub stock_quantity: i32,
    pub last_updated: NaiveDateTime,
}

/// A derived row ready for insertion into `books_processed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBookRecord {
    pub book_id: i32,
    pub title: String,
    pub original_price: Decimal,
    pub rounded_price: Decimal,
    pub genre: String,
    pub price_category: PriceCategory,
}

/// Pricing classification derived from the rounded price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceCategory {
    Budget,
    Premium,
}

impl PriceCategory {
    /// Lowercase string stored in the `price_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::Budget => "budget",
            PriceCategory::Premium => "premium",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of source columns the extractor may select.
///
/// These are the only names ever interpolated into query text; everything
/// externally supplied is bound as a parameter instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceColumn {
    BookId,
    Title,
    Price,
    Genre,
    StockQuantity,
    LastUpdated,
}

impl SourceColumn {
    /// Every selectable column, in source-table order.
    pub const ALL: [SourceColumn; 6] = [
        SourceColumn::BookId,
        SourceColumn::Title,
        SourceColumn::Price,
        SourceColumn::Genre,
        SourceColumn::StockQuantity,
        SourceColumn::LastUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceColumn::BookId => "book_id",
            SourceColumn::Title => "title",
            SourceColumn::Price => "price",
            SourceColumn::Genre => "genre",
            SourceColumn::StockQuantity => "stock_quantity",
            SourceColumn::LastUpdated => "last_updated",
        }
    }
}

/// Summary of a completed ETL run.
#[derive(Debug, Serialize)]
pub struct EtlRunReport {
    pub cutoff_date: NaiveDate,
    pub rows_extracted: usize,
    pub rows_loaded: u64,
}
