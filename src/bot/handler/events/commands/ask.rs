use serenity::all::UserId;
use tokio::time::Instant;

use super::ReplySink;
use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::{Context, InnerData};
use crate::chat::{emitter::MessageSink, relay::RelayError};

/// Cooldown, then usage, then relay and emit. Usage problems never reach the relay.
pub async fn dispatch_ask(
    data: &InnerData,
    caller: UserId,
    prompt: Option<String>,
    sink: &dyn MessageSink,
) -> anyhow::Result<()> {
    let admission = data.cooldown.admit(caller, Instant::now()).await;
    if let Some(wait) = admission.retry_after_secs() {
        sink.send(format!("⏳ You're using that too fast! Try again in {wait:.1}s."))
            .await?;

        return Ok(());
    }

    let Some(prompt) = prompt
        .map(|prompt| prompt.trim().to_string())
        .filter(|prompt| !prompt.is_empty())
    else {
        sink.send(data.usage()).await?;

        return Ok(());
    };

    log::info!("received ask from {caller}: {prompt}");

    let typing = sink.start_typing().await;
    let response = data.relay.complete(&prompt).await;
    if let Some(typing) = typing {
        typing.stop();
    }

    match response {
        Ok(answer) => {
            let sent = data.emitter.emit(sink, &answer).await?;
            log::info!("answered {caller} in {sent} message(s)");
        }
        Err(RelayError::EmptyResult) => {
            sink.send(RelayError::EmptyResult.user_message().to_string())
                .await?;
        }
        Err(why) => return Err(why.into()),
    }

    Ok(())
}

/// Sends the prompt through the relay and posts the answer in chunks
pub async fn ask(ctx: Context<'_>, prompt: Option<String>) -> HandlerResult<'_, ()> {
    let data = ctx.data().clone();

    match dispatch_ask(&data, ctx.author().id, prompt, &ReplySink(ctx)).await {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
