//! Database migration command.
//!
//! Runs the storefront schema migrations embedded in the storefront crate,
//! then the tower-sessions table migration (the session store owns its own
//! DDL).

use tracing::info;

/// Run all storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to storefront database");

    info!("Running storefront migrations...");
    golazo_storefront::db::MIGRATOR.run(&pool).await?;

    info!("Running session store migration...");
    let session_store = tower_sessions_sqlx_store::PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    info!("Migrations complete!");
    Ok(())
}
