use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Shows uptime, server count and memory usage
#[poise::command(slash_command, prefix_command)]
pub(super) async fn status(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::status(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
