use crate::bot::commands::respond;
use crate::bot::dispatch::BotCommand;
use crate::bot::{Context, Error};

/// Support the developer
#[poise::command(slash_command)]
pub async fn support(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, BotCommand::Support).await
}
