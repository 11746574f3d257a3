use cleanops_api::config::ApiConfig;
use cleanops_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    // Opening the pool creates the SQLite file when it does not exist yet
    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    cleanops_api::start_server(config, db_pool).await?;

    Ok(())
}
