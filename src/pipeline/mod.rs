//! The ETL driver: date validation, then extract → transform → load inside
//! one transaction on one connection.

pub mod extract;
pub mod load;
pub mod transform;

use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use tracing::{error, info};

use crate::config::DbConfig;
use crate::constants::CUTOFF_DATE_FORMAT;
use crate::db;
use crate::error::{EtlError, Result};
use crate::types::{EtlRunReport, SourceColumn};

/// Validates the cutoff-date argument against the fixed `YYYY-MM-DD` format.
/// An invalid date stops the run before any connection is opened.
pub fn parse_cutoff_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, CUTOFF_DATE_FORMAT)
        .map_err(|_| EtlError::InvalidDate(raw.to_string()))
}

/// Runs one complete ETL pass for the given cutoff date.
///
/// The connection is an explicit acquire-use-release scope: opened here,
/// closed on every exit path, whether the transaction commits or rolls back.
pub async fn run(config: &DbConfig, cutoff_arg: &str) -> Result<EtlRunReport> {
    let cutoff = parse_cutoff_date(cutoff_arg)?;
    info!("Starting ETL run with cutoff date {cutoff}");

    let mut conn = db::connect(config).await?;
    let outcome = run_transaction(&mut conn, cutoff).await;
    db::close(conn).await;

    match &outcome {
        Ok(report) => info!(
            "ETL run completed: {} extracted, {} loaded",
            report.rows_extracted, report.rows_loaded
        ),
        Err(e) => error!("ETL run aborted: {e}"),
    }
    outcome
}

/// Wraps the three stages in a single transaction: commit on success,
/// explicit logged rollback on any stage failure, error propagated either way.
async fn run_transaction(conn: &mut PgConnection, cutoff: NaiveDate) -> Result<EtlRunReport> {
    let mut tx = conn.begin().await.map_err(EtlError::Transaction)?;

    match run_stages(&mut tx, cutoff).await {
        Ok(report) => {
            tx.commit().await.map_err(EtlError::Transaction)?;
            info!("Transaction committed");
            Ok(report)
        }
        Err(e) => {
            error!("Pipeline stage failed, rolling back transaction: {e}");
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback failed: {rollback_err}");
            }
            Err(e)
        }
    }
}

async fn run_stages(conn: &mut PgConnection, cutoff: NaiveDate) -> Result<EtlRunReport> {
    let rows = extract::extract(conn, cutoff, &SourceColumn::ALL).await?;
    let rows_extracted = rows.len();

    let records = transform::transform(&rows)?;

    let rows_loaded = load::load(conn, &records).await?;

    Ok(EtlRunReport {
        cutoff_date: cutoff,
        rows_extracted,
        rows_loaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cutoff_date_accepts_iso_calendar_dates() {
        let date = parse_cutoff_date("2024-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_cutoff_date_rejects_other_formats() {
        for bad in ["2024/01/01", "01-01-2024", "2024-13-01", "2024-01-01T00:00:00", "", "today"] {
            let err = parse_cutoff_date(bad).unwrap_err();
            assert!(matches!(err, EtlError::InvalidDate(_)), "accepted {bad:?}");
        }
    }
}
