use async_trait::async_trait;
use serenity::all::Typing;

use crate::bot::handler::framework::Context;
use crate::chat::emitter::MessageSink;

pub mod ask;
pub mod ping;
pub mod status;

pub use ask::ask;
pub use ping::ping;
pub use status::status;

/// Replies through the invoking command, one message per chunk.
pub struct ReplySink<'a>(pub Context<'a>);

#[async_trait]
impl<'a> MessageSink for ReplySink<'a> {
    async fn send(&self, content: String) -> anyhow::Result<()> {
        self.0.say(content).await?;

        Ok(())
    }

    async fn start_typing(&self) -> Option<Typing> {
        // slash commands must be acknowledged within three seconds
        if let Err(why) = self.0.defer().await {
            log::warn!("could not defer interaction: {why:?}");
        }

        Some(
            self.0
                .channel_id()
                .start_typing(&self.0.serenity_context().http),
        )
    }
}
