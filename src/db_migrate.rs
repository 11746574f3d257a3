use cleanops_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_DATABASE_URL: &str = "sqlite://cleaning_ops.db";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables
    dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    info!("Connecting to {}", database_url);
    let db_pool = create_pool(&database_url).await?;

    info!("Initializing database schema");
    initialize_database(&db_pool).await?;
    info!("Database schema initialized successfully");

    Ok(())
}
