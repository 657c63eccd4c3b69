use std::sync::Arc;

use anyhow::Result;
use handler::{Handler, framework::InnerData};
use serenity::{Client, all::GatewayIntents};
use tokio::task::JoinHandle;

use crate::{
    chat::{
        client::OpenAICompatible,
        relay::{CompletionRelay, RelaySettings},
    },
    config::store::ChatBotConfig,
};

mod handler;

pub struct FridayBot {
    client: Client,
    handle: JoinHandle<()>,
}

impl FridayBot {
    pub async fn new(config: ChatBotConfig) -> Result<Self> {
        let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
        let builder = serenity::Client::builder(&config.secrets.discord_token, intents);

        let backend = OpenAICompatible::new(
            &config.secrets.together_api_key,
            &config.llm.base_url,
            &config.llm.model,
        );
        let relay = CompletionRelay::new(Arc::new(backend), RelaySettings::from(&config.llm));
        log::info!(
            "relaying to {} at {}",
            config.llm.model,
            config.llm.base_url
        );

        let data = Arc::new(InnerData::new(config, relay)?);
        let framework = handler::framework::framework(data.clone());
        let (handler, handle) = Handler::new(data);

        let client = builder
            .event_handler_arc(handler)
            .framework(framework)
            .await?;

        Ok(Self { client, handle })
    }

    pub async fn run(self) -> Result<()> {
        let FridayBot { mut client, handle } = self;

        let result = client.start().await;
        handle.abort();

        if let Err(why) = &result {
            log::error!("Client error: {why:?}");
        }

        Ok(result?)
    }
}
