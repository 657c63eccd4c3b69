use std::sync::Arc;

use poise::FrameworkError;
use serenity::all::Framework;
use tokio::time::Instant;

use super::{
    Handler,
    events::{HandlerResult, commands},
};
use crate::{
    chat::{cooldown::CooldownGate, emitter::ChunkEmitter, relay::CompletionRelay},
    config::store::ChatBotConfig,
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

mod ask;
mod ping;
mod status;

pub struct InnerData {
    pub config: ChatBotConfig,
    pub relay: CompletionRelay,
    pub cooldown: CooldownGate,
    pub emitter: ChunkEmitter,
    pub started: Instant,
}
pub type Data = Arc<InnerData>;

impl InnerData {
    pub fn new(config: ChatBotConfig, relay: CompletionRelay) -> anyhow::Result<Self> {
        let cooldown = CooldownGate::new(config.cooldown()?);
        let emitter = ChunkEmitter::new(config.discord.chunk_size, config.chunk_delay());

        Ok(Self {
            config,
            relay,
            cooldown,
            emitter,
            started: Instant::now(),
        })
    }

    pub fn usage(&self) -> String {
        ask_usage(&self.config.discord.prefix)
    }
}

fn ask_usage(prefix: &str) -> String {
    format!("⚠️ You missed an argument. Try `{prefix}ask your question here`.")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoArgCommand {
    Ping,
    Status,
}

/// How a prefix invocation whose arguments could not be parsed is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentFallback {
    /// The command takes nothing, so trailing words are dropped and it runs anyway.
    IgnoreArguments(NoArgCommand),
    Usage(String),
}

pub fn argument_fallback(command: &str, prefix: &str) -> ArgumentFallback {
    match command {
        "ping" => ArgumentFallback::IgnoreArguments(NoArgCommand::Ping),
        "status" => ArgumentFallback::IgnoreArguments(NoArgCommand::Status),
        "ask" => ArgumentFallback::Usage(ask_usage(prefix)),
        other => ArgumentFallback::Usage(format!(
            "⚠️ Couldn't understand the arguments to `{prefix}{other}`."
        )),
    }
}

pub fn framework(data: Data) -> impl Framework + 'static {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![ask::ask(), ping::ping(), status::status()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(data.config.discord.prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                log::info!(
                    "registered {} slash commands",
                    framework.options().commands.len()
                );
                Ok(data)
            })
        })
        .build()
}

/// Usage problems never reach the relay; anything else is logged in full and
/// answered with a short generic message.
async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::UnknownCommand { .. } => {}
        FrameworkError::ArgumentParse { ctx, error, .. } => {
            let name = &ctx.command().name;
            log::debug!("argument parse error in `{name}`: {error}");

            let result = match argument_fallback(name, &ctx.data().config.discord.prefix) {
                ArgumentFallback::IgnoreArguments(NoArgCommand::Ping) => commands::ping(ctx).await,
                ArgumentFallback::IgnoreArguments(NoArgCommand::Status) => {
                    commands::status(ctx).await
                }
                ArgumentFallback::Usage(usage) => match ctx.say(usage).await {
                    Ok(_) => HandlerResult::ok(()),
                    Err(why) => HandlerResult::err(why, ctx),
                },
            };

            if let HandlerResult::Err(why) = result {
                Handler::on_error(why).await;
            }
        }
        FrameworkError::Command { ctx, error, .. } => {
            log::error!("error in command `{}`: {error:?}", ctx.command().name);
            if let Err(why) = ctx.say("❌ An unexpected error occurred.").await {
                log::error!("error during propagation of error to user: {why:?}");
            }
        }
        error => {
            if let Err(why) = poise::builtins::on_error(error).await {
                log::error!("error while handling framework error: {why:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::RecordingSink;

    #[tokio::test]
    async fn trailing_words_after_ping_still_pong() {
        let fallback = argument_fallback("ping", "!!");
        assert_eq!(fallback, ArgumentFallback::IgnoreArguments(NoArgCommand::Ping));

        let sink = RecordingSink::default();
        commands::ping::respond_ping(&sink).await.unwrap();

        assert_eq!(sink.contents(), vec![commands::ping::PONG]);
    }

    #[test]
    fn status_ignores_trailing_words() {
        assert_eq!(
            argument_fallback("status", "!!"),
            ArgumentFallback::IgnoreArguments(NoArgCommand::Status)
        );
    }

    #[test]
    fn only_ask_gets_the_ask_usage_hint() {
        assert_eq!(
            argument_fallback("ask", "!"),
            ArgumentFallback::Usage(
                "⚠️ You missed an argument. Try `!ask your question here`.".to_string()
            )
        );

        match argument_fallback("other", "!!") {
            ArgumentFallback::Usage(usage) => {
                assert!(!usage.contains("ask"));
                assert!(usage.contains("!!other"));
            }
            fallback => panic!("unexpected fallback {fallback:?}"),
        }
    }
}
