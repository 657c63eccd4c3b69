use std::sync::Arc;

pub use framework::Data;
use serenity::{
    all::{Context, EventHandler, GuildId, Interaction, Ready},
    async_trait,
};
use tokio::task::JoinHandle;

use crate::utils::misc;

mod buttons;
mod events;
pub mod framework;

pub struct Handler {
    pub data: Data,
}

impl Handler {
    /// Builds the event handler and starts the liveness heartbeat next to it.
    pub fn new(data: Data) -> (Arc<Self>, JoinHandle<()>) {
        let handle = tokio::spawn(heartbeat(data.clone()));

        (Arc::new(Self { data }), handle)
    }
}

async fn heartbeat(data: Data) {
    let mut interval = tokio::time::interval(data.config.heartbeat());
    // first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let uptime = chrono::Duration::from_std(data.started.elapsed()).unwrap_or_default();
        log::info!("🩺 bot still alive, up {}", misc::time_to_string(uptime));
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        log::info!(
            "FRIDAYGPT is live as {} in {} server(s), listening for {}ask",
            ready.user.name,
            ready.guilds.len(),
            self.data.config.discord.prefix
        );

        ctx.set_presence(None, serenity::all::OnlineStatus::Online);
    }

    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        for id in guilds {
            let name = ctx
                .cache
                .guild(id)
                .map(|guild| guild.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            log::info!("🛰️ connected to: {name} (ID: {id})");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let events::HandlerResult::Err(why) = self.on_interaction(ctx, interaction).await {
            Self::on_error(why).await;
        }
    }
}
