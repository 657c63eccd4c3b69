use serenity::all::{ComponentInteraction, Context};

use super::super::Handler;

impl Handler {
    /// Removes an error embed when its trash button is pressed.
    pub async fn delete_error(
        &self,
        component: &ComponentInteraction,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        component.defer(ctx).await?;
        component.message.delete(ctx).await?;

        Ok(())
    }
}
