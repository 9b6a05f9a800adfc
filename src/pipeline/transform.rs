use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::{error, info};

use crate::constants::{BUDGET_PRICE_CEILING, ROUNDED_PRICE_SCALE};
use crate::error::{EtlError, Result};
use crate::types::{PriceCategory, ProcessedBookRecord, RawBookRecord, SourceColumn};

/// Maps extracted rows to processed records, one-to-one and order-preserving.
///
/// A malformed row (missing column, NULL field, non-numeric price) fails the
/// whole call; no partial output is ever returned.
pub fn transform(rows: &[PgRow]) -> Result<Vec<ProcessedBookRecord>> {
    let mut raws = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        raws.push(decode_row(row, index).map_err(|e| {
            error!("Failed to transform extracted data: {e}");
            e
        })?);
    }

    let processed = transform_records(&raws);
    info!("Transformed {} records", processed.len());
    Ok(processed)
}

/// Pure derivation over already-decoded records. Same input always yields
/// the same output; the input is never mutated.
pub fn transform_records(raws: &[RawBookRecord]) -> Vec<ProcessedBookRecord> {
    raws.iter().map(derive_record).collect()
}

/// Derives one processed record from one raw record.
///
/// The rounded price keeps one decimal place using round-half-to-even
/// (banker's rounding), so the 499.95 midpoint resolves to 500.0 and lands
/// in "premium". Zero and negative prices follow the same rule and come out
/// "budget".
pub fn derive_record(raw: &RawBookRecord) -> ProcessedBookRecord {
    let rounded_price = raw.price.round_dp(ROUNDED_PRICE_SCALE);
    let price_category = if rounded_price < Decimal::from(BUDGET_PRICE_CEILING) {
        PriceCategory::Budget
    } else {
        PriceCategory::Premium
    };

    ProcessedBookRecord {
        book_id: raw.book_id,
        title: raw.title.clone(),
        original_price: raw.price,
        rounded_price,
        genre: raw.genre.clone(),
        price_category,
    }
}

fn decode_row(row: &PgRow, index: usize) -> Result<RawBookRecord> {
    Ok(RawBookRecord {
        book_id: get(row, index, SourceColumn::BookId)?,
        title: get(row, index, SourceColumn::Title)?,
        price: get(row, index, SourceColumn::Price)?,
        genre: get(row, index, SourceColumn::Genre)?,
        stock_quantity: get(row, index, SourceColumn::StockQuantity)?,
        last_updated: get(row, index, SourceColumn::LastUpdated)?,
    })
}

fn get<'r, T>(row: &'r PgRow, index: usize, column: SourceColumn) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column.as_str()).map_err(|e| EtlError::Transform {
        row: index,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn raw(book_id: i32, title: &str, price: Decimal) -> RawBookRecord {
        RawBookRecord {
            book_id,
            title: title.to_string(),
            price,
            genre: "scifi".to_string(),
            stock_quantity: 10,
            last_updated: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_original_price_passes_through_exactly() {
        let record = derive_record(&raw(1, "Dune", dec!(550.00)));
        assert_eq!(record.original_price, dec!(550.00));
        assert_eq!(record.rounded_price, dec!(550.0));
        assert_eq!(record.price_category, PriceCategory::Premium);
    }

    #[test]
    fn test_rounding_is_half_to_even_at_one_decimal() {
        assert_eq!(derive_record(&raw(1, "a", dec!(499.94))).rounded_price, dec!(499.9));
        // Midpoints resolve to the even tenth.
        assert_eq!(derive_record(&raw(1, "a", dec!(499.95))).rounded_price, dec!(500.0));
        assert_eq!(derive_record(&raw(1, "a", dec!(0.25))).rounded_price, dec!(0.2));
        assert_eq!(derive_record(&raw(1, "a", dec!(0.35))).rounded_price, dec!(0.4));
    }

    #[test]
    fn test_category_boundary_at_500() {
        assert_eq!(
            derive_record(&raw(1, "a", dec!(499.94))).price_category,
            PriceCategory::Budget
        );
        // 499.95 rounds up to 500.0, which is not < 500.
        assert_eq!(
            derive_record(&raw(2, "b", dec!(499.95))).price_category,
            PriceCategory::Premium
        );
        assert_eq!(
            derive_record(&raw(3, "c", dec!(500.00))).price_category,
            PriceCategory::Premium
        );
    }

    #[test]
    fn test_zero_and_negative_prices_are_budget() {
        assert_eq!(
            derive_record(&raw(1, "free", dec!(0))).price_category,
            PriceCategory::Budget
        );
        assert_eq!(
            derive_record(&raw(2, "refund", dec!(-12.34))).price_category,
            PriceCategory::Budget
        );
    }

    #[test]
    fn test_transform_records_preserves_order_and_count() {
        let raws = vec![
            raw(3, "third", dec!(10.0)),
            raw(1, "first", dec!(700.0)),
            raw(2, "second", dec!(499.95)),
        ];

        let processed = transform_records(&raws);
        assert_eq!(processed.len(), 3);
        assert_eq!(
            processed.iter().map(|r| r.book_id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_transform_records_is_idempotent() {
        let raws = vec![raw(1, "Dune", dec!(550.00)), raw(2, "Foo", dec!(499.95))];
        assert_eq!(transform_records(&raws), transform_records(&raws));
    }
}
