use budget_tracker::{
    cli::{MenuController, console::Terminal},
    config::{self, database},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenv().is_ok();

    // 2. Load the application configuration
    let app_config = config::load_app_configuration()?;

    // 3. Initialize tracing on stderr so it stays out of the menus
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    info!(dotenv_loaded, "Configuration loaded");

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Run the menus until the user exits
    let mut controller = MenuController::new(&db, Terminal, app_config.budget_delete_scope);
    controller
        .run()
        .await
        .inspect_err(|e| error!("Fatal error: {}", e))?;

    Ok(())
}
