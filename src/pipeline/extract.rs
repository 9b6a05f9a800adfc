use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;
use tracing::{error, info};

use crate::constants::SOURCE_TABLE;
use crate::error::{EtlError, Result};
use crate::types::SourceColumn;

/// Builds the extraction query for an allow-listed column selection.
///
/// Column names come only from the `SourceColumn` enum; the cutoff date is
/// always a bound parameter, never spliced into the text.
pub fn select_statement(columns: &[SourceColumn]) -> String {
    let column_list = columns
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {column_list} FROM {SOURCE_TABLE} WHERE {} >= $1",
        SourceColumn::LastUpdated.as_str()
    )
}

/// Fetches every source row whose `last_updated` is on or after the cutoff
/// date. The comparison runs database-side, so a calendar-date cutoff
/// matches any time of day on or after that date. An empty result is a
/// normal outcome, not an error.
pub async fn extract(
    conn: &mut PgConnection,
    cutoff: NaiveDate,
    columns: &[SourceColumn],
) -> Result<Vec<PgRow>> {
    let query = select_statement(columns);

    let rows = sqlx::query(&query)
        .bind(cutoff)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("Failed to extract rows from {SOURCE_TABLE}: {e}");
            EtlError::Extract(e)
        })?;

    info!("Extracted {} rows updated on or after {}", rows.len(), cutoff);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_statement_full_column_list() {
        assert_eq!(
            select_statement(&SourceColumn::ALL),
            "SELECT book_id, title, price, genre, stock_quantity, last_updated \
             FROM books WHERE last_updated >= $1"
        );
    }

    #[test]
    fn test_select_statement_subset() {
        let columns = [SourceColumn::BookId, SourceColumn::Price];
        assert_eq!(
            select_statement(&columns),
            "SELECT book_id, price FROM books WHERE last_updated >= $1"
        );
    }
}
