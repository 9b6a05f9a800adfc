use sqlx::{Connection, PgConnection};
use tracing::{error, info, warn};

use crate::config::DbConfig;
use crate::error::{EtlError, Result};

/// Opens the single connection an ETL run operates on.
pub async fn connect(config: &DbConfig) -> Result<PgConnection> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}",
        config.host, config.port, config.dbname
    );

    PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            EtlError::Connect(e)
        })
}

/// Releases the run's connection. Called on every exit path, commit or rollback.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!("Error while closing database connection: {e}");
    }
}
