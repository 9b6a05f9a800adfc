use std::env;

use sqlx::postgres::PgConnectOptions;

use crate::error::{EtlError, Result};

/// Database connection settings, read from the environment.
///
/// All five variables are required; a missing one is a fatal startup error.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        let port_raw = required_var("DB_PORT")?;
        let port: u16 = port_raw
            .parse()
            .map_err(|_| EtlError::Config(format!("DB_PORT must be a port number, got '{port_raw}'")))?;

        Ok(Self {
            host: required_var("DB_HOST")?,
            port,
            dbname: required_var("DB_NAME")?,
            user: required_var("DB_USER")?,
            password: required_var("DB_PASSWORD")?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| EtlError::Config(format!("{name} environment variable not set")))
}
