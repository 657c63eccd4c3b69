use std::sync::Arc;

use poise::CreateReply;
use serenity::all::{ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateMessage, Http};

use crate::{bot::handler::framework::Context, chat::relay::RelayError};

use super::super::Handler;

const GENERIC_FAILURE: &str = "❌ An unexpected error occurred.";

/// What the channel gets to see; the full error only goes to the log.
pub fn user_message(error: &anyhow::Error) -> &'static str {
    match error.downcast_ref::<RelayError>() {
        Some(relay_error) => relay_error.user_message(),
        None => GENERIC_FAILURE,
    }
}

impl Handler {
    /// attempts to relay an error into a discord channel, still logging it
    /// if fails, still logs and logs the failure of the failure (lol)
    pub async fn on_error(error: HandlerError<'_>) {
        let HandlerError { error, location } = error;

        log::error!("handling error:\n\n{error:?}\n");

        let embed = CreateEmbed::default()
            .color(0xFF6961)
            .title("FRIDAY hit a problem")
            .description(user_message(&error));
        let button = CreateButton::new("delete_error")
            .label("")
            .emoji('🗑')
            .style(serenity::all::ButtonStyle::Danger);

        match location {
            ErrorLocation::Context(ctx) => {
                if let Err(why) = ctx
                    .send(
                        CreateReply::default()
                            .embed(embed)
                            .components(vec![CreateActionRow::Buttons(vec![button])]),
                    )
                    .await
                {
                    log::error!("error during propagation of error to user: {why:?}");
                }
            }
            ErrorLocation::Channel((http, channel_id)) => {
                let message = CreateMessage::new().embed(embed).button(button);
                if let Err(why) = channel_id.send_message(http, message).await {
                    log::error!("error during propagation of error to user: {why:?}");
                }
            }
        }
    }
}

pub enum ErrorLocation<'a> {
    Context(Context<'a>),
    Channel((Arc<Http>, ChannelId)),
}

impl<'a> From<Context<'a>> for ErrorLocation<'a> {
    fn from(ctx: Context<'a>) -> Self {
        ErrorLocation::Context(ctx)
    }
}

impl From<(Arc<Http>, ChannelId)> for ErrorLocation<'static> {
    fn from(value: (Arc<Http>, ChannelId)) -> Self {
        ErrorLocation::Channel(value)
    }
}

pub struct HandlerError<'a> {
    error: anyhow::Error,
    location: ErrorLocation<'a>,
}

pub enum HandlerResult<'a, T> {
    Ok(T),
    Err(HandlerError<'a>),
}

impl<'a, T> HandlerResult<'a, T> {
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    pub fn err(error: impl Into<anyhow::Error>, location: impl Into<ErrorLocation<'a>>) -> Self {
        Self::Err(HandlerError {
            error: error.into(),
            location: location.into(),
        })
    }
}
