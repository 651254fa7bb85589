use crate::bot::{Data, Error};
use crate::utils::format::format_error_message;
use poise::serenity_prelude as serenity;

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        tracing::info!(
            "Logged in as {} ({} races loaded)",
            data_about_bot.user.tag(),
            data.calendar.races().len()
        );
    }
    Ok(())
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command /{}: {:?}", ctx.command().name, error);
            let msg = format_error_message("Something went wrong while building the reply.");
            if let Err(e) = ctx
                .send(poise::CreateReply::default().content(msg).ephemeral(true))
                .await
            {
                tracing::error!("Failed to report command error: {:?}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {:?}", e);
            }
        }
    }
}
