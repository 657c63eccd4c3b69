use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Ask FRIDAY anything
#[poise::command(slash_command, prefix_command)]
pub(super) async fn ask(
    ctx: Context<'_>,
    #[description = "What you want to ask"]
    #[rest]
    prompt: Option<String>,
) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::ask(ctx, prompt).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
