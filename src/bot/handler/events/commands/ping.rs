use super::ReplySink;
use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;
use crate::chat::emitter::MessageSink;

pub const PONG: &str = "🏓 Pong! FRIDAY is alive.";

/// Always the same reply, whatever state the bot is in
pub fn pong() -> &'static str {
    PONG
}

pub async fn respond_ping(sink: &dyn MessageSink) -> anyhow::Result<()> {
    sink.send(pong().to_string()).await
}

pub async fn ping(ctx: Context<'_>) -> HandlerResult<'_, ()> {
    match respond_ping(&ReplySink(ctx)).await {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
