use std::path::PathBuf;

use config::store::ChatBotConfig;
use utils::log::Logger;

mod bot;
mod chat;
mod config;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine, the variables may come from the real environment
    let _ = dotenvy::dotenv();
    Logger::init(None);

    log::info!("🔥 FRIDAYGPT starting");

    let path = std::env::var("FRIDAY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = ChatBotConfig::load(PathBuf::from(path))?;

    let bot = bot::FridayBot::new(config).await?;
    bot.run().await
}
