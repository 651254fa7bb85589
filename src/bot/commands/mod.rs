pub mod schedule;
pub mod standings;
pub mod support;

use crate::bot::dispatch::{BotCommand, Reply, dispatch};
use crate::bot::{Context, Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        schedule::next(),
        schedule::nextweekend(),
        standings::standings(),
        support::support(),
    ]
}

/// Runs `command` against the loaded calendar and sends the result.
pub async fn respond(ctx: Context<'_>, command: BotCommand) -> Result<(), Error> {
    let data = ctx.data();
    let reply = dispatch(
        command,
        data.calendar.as_ref(),
        &data.settings,
        chrono::Utc::now(),
    );

    match reply {
        Reply::Text(text) => {
            ctx.say(text).await?;
        }
        Reply::Embed(embed) => {
            let reply = embed
                .pages()
                .iter()
                .fold(poise::CreateReply::default(), |reply, page| {
                    reply.embed(page.to_create_embed())
                });
            ctx.send(reply).await?;
        }
        Reply::Ephemeral(text) => {
            ctx.send(poise::CreateReply::default().content(text).ephemeral(true))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_the_four_calendar_commands() {
        let names: Vec<String> = all().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["next", "nextweekend", "standings", "support"]);
    }

    #[test]
    fn only_standings_takes_a_parameter() {
        for command in all() {
            if command.name == "standings" {
                assert_eq!(command.parameters.len(), 1);
                assert_eq!(command.parameters[0].name, "type");
                assert!(command.parameters[0].required);
            } else {
                assert!(command.parameters.is_empty(), "/{} has parameters", command.name);
            }
        }
    }

    #[test]
    fn standings_type_is_a_required_string_option() {
        let standings = all()
            .into_iter()
            .find(|c| c.name == "standings")
            .expect("no /standings");
        let json = serde_json::to_value(standings.create_as_slash_command().unwrap()).unwrap();
        let option = &json["options"][0];

        assert_eq!(option["name"], "type");
        assert_eq!(option["type"], 3);
        assert_eq!(option["required"], true);
        let values: Vec<&str> = option["choices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|choice| choice["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, ["riders", "constructors"]);
    }
}
