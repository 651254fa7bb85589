use crate::bot::commands::respond;
use crate::bot::dispatch::BotCommand;
use crate::bot::{Context, Error};

/// Shows the full schedule of the next MotoGP weekend in your local time
#[poise::command(slash_command)]
pub async fn next(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, BotCommand::NextRace).await
}

/// Shows the full schedule of the next MotoGP weekend in your local time
#[poise::command(slash_command)]
pub async fn nextweekend(ctx: Context<'_>) -> Result<(), Error> {
    respond(ctx, BotCommand::NextRace).await
}
