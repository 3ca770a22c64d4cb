//! Headless bootstrap entry point.
//!
//! Opens (or creates) the database, runs migrations, makes sure a login is
//! possible and prints a short status line. The desktop shell links
//! `balcao-pos` as a library; this binary exists for first-run setup and
//! for checking a database file from the command line.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use balcao_pos::{PosApp, PosConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = PosConfig::load()?;
    info!(db = %config.database_path.display(), "Starting Balcão POS");

    let app = PosApp::start(config).await?;

    let users = app.db.users().count().await?;
    let products = app.db.products().count().await?;
    let sales = app.db.sales().count().await?;

    info!(users, products, sales, "Database ready");

    if users == 1 && sales == 0 {
        info!("First run? Log in with admin / admin123 and change the password.");
    }

    app.db.close().await;
    Ok(())
}
