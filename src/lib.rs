pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;
