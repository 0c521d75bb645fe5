use dotenvy::dotenv;
use refurb_buddy::{
    bot::{self, BotData},
    config::{catalog, database, staff},
    core::{brand, platform},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 4. Seed platforms and brands from config.toml
    let config = catalog::load_default_config()?;
    let platforms = platform::seed_platforms(&db, &config.platforms).await?;
    let brands = brand::seed_brands(&db, &config.brands).await?;
    info!(platforms, brands, "Seeded catalog configuration");

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let staff_ids = staff::get_staff_ids();
    if staff_ids.is_empty() {
        info!("STAFF_USER_IDS is empty; staff commands are disabled.");
    }

    bot::run_bot(token, BotData::new(db, staff_ids)).await
}
