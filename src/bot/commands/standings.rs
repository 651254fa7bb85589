use crate::bot::commands::respond;
use crate::bot::dispatch::{BotCommand, StandingsKind};
use crate::bot::{Context, Error};

/// Shows the current championship standings
#[poise::command(slash_command)]
pub async fn standings(
    ctx: Context<'_>,
    #[rename = "type"]
    #[description = "Choose riders or constructors"]
    kind: StandingsKind,
) -> Result<(), Error> {
    respond(ctx, BotCommand::Standings(kind)).await
}
