use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Checks whether FRIDAY is alive
#[poise::command(slash_command, prefix_command)]
pub(super) async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::ping(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
