use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use books_etl::config::DbConfig;
use books_etl::error::EtlError;
use books_etl::{logging, pipeline};

#[derive(Parser)]
#[command(name = "books_etl")]
#[command(about = "Batch ETL for book records: extract by cutoff date, derive pricing, load")]
#[command(version = "0.1.0")]
struct Cli {
    /// Inclusive lower bound on last_updated, formatted YYYY-MM-DD
    cutoff_date: String,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Startup failed: {e}");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!("📚 Running books ETL with cutoff {}...", cli.cutoff_date);

    match pipeline::run(&config, &cli.cutoff_date).await {
        Ok(report) => {
            if let Ok(summary) = serde_json::to_string(&report) {
                info!(report = %summary, "ETL process completed successfully");
            }
            println!("\n📊 ETL run results:");
            println!("   Cutoff date: {}", report.cutoff_date);
            println!("   Rows extracted: {}", report.rows_extracted);
            println!("   Rows loaded: {}", report.rows_loaded);
            println!("✅ ETL run completed successfully");
        }
        // The one fully swallowed error: reported to the user, never re-raised.
        Err(EtlError::InvalidDate(raw)) => {
            error!("Invalid date format '{raw}'. Please use YYYY-MM-DD.");
            println!("❌ Invalid date format '{raw}'. Please use YYYY-MM-DD.");
        }
        Err(e) => {
            error!("ETL process failed: {e}");
            println!("❌ ETL run failed: {e}");
        }
    }
}
