use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{error, info};

use crate::constants::DEST_TABLE;
use crate::error::{EtlError, Result};
use crate::types::ProcessedBookRecord;

fn insert_statement_prefix() -> String {
    format!(
        "INSERT INTO {DEST_TABLE} \
         (book_id, title, original_price, rounded_price, genre, price_category) "
    )
}

/// Inserts every processed record into the destination table as one
/// multi-row statement. Unconditional insert, no existence check;
/// atomicity belongs to the enclosing transaction. Returns the number of
/// rows written; an empty batch is a no-op.
pub async fn load(conn: &mut PgConnection, records: &[ProcessedBookRecord]) -> Result<u64> {
    if records.is_empty() {
        info!("No records to load into {DEST_TABLE}");
        return Ok(0);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(insert_statement_prefix());
    builder.push_values(records.iter(), |mut row, record| {
        row.push_bind(record.book_id)
            .push_bind(&record.title)
            .push_bind(record.original_price)
            .push_bind(record.rounded_price)
            .push_bind(&record.genre)
            .push_bind(record.price_category.as_str());
    });

    let result = builder.build().execute(&mut *conn).await.map_err(|e| {
        error!("Failed to load records into {DEST_TABLE}: {e}");
        EtlError::Load(e)
    })?;

    info!("Inserted {} records into {DEST_TABLE}", result.rows_affected());
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement_targets_destination_columns() {
        assert_eq!(
            insert_statement_prefix(),
            "INSERT INTO books_processed \
             (book_id, title, original_price, rounded_price, genre, price_category) "
        );
    }
}
