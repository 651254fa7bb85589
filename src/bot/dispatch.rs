//! Command handling independent of the Discord connection.
//!
//! Each slash command is turned into a [`BotCommand`] and answered with a
//! [`Reply`]; the poise command functions only translate the reply into a
//! Discord message.

use crate::calendar::{CalendarSource, next_race};
use crate::config::TimeStyle;
use crate::utils::format::{
    NO_UPCOMING_RACES, ReplyEmbed, SUPPORT_MESSAGE, create_constructors_embed,
    create_riders_embed, create_schedule_embed,
};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use std::str::FromStr;

/// Riders shown by `/standings riders`.
pub const RIDER_STANDINGS_LIMIT: usize = 15;

/// Value of the `/standings type` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsKind {
    Riders,
    Constructors,
}

impl StandingsKind {
    pub const ALL: [StandingsKind; 2] = [StandingsKind::Riders, StandingsKind::Constructors];

    /// Label shown in the Discord option picker.
    pub fn display_name(self) -> &'static str {
        match self {
            StandingsKind::Riders => "Riders",
            StandingsKind::Constructors => "Constructors",
        }
    }

    /// String sent back by Discord when the choice is picked.
    pub fn value(self) -> &'static str {
        match self {
            StandingsKind::Riders => "riders",
            StandingsKind::Constructors => "constructors",
        }
    }
}

impl FromStr for StandingsKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandingsKind::ALL
            .into_iter()
            .find(|kind| kind.value().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown standings type {:?}. Use riders or constructors", s)
            })
    }
}

/// Registered as a string option with fixed string choices.
#[async_trait::async_trait]
impl poise::SlashArgument for StandingsKind {
    async fn extract(
        _ctx: &serenity::Context,
        _interaction: &serenity::CommandInteraction,
        value: &serenity::ResolvedValue<'_>,
    ) -> Result<Self, poise::SlashArgError> {
        match *value {
            serenity::ResolvedValue::String(raw) => raw
                .parse::<StandingsKind>()
                .map_err(|e| poise::SlashArgError::Parse {
                    error: e.into(),
                    input: raw.to_string(),
                }),
            _ => Err(poise::SlashArgError::Invalid(
                "expected a string for the standings type",
            )),
        }
    }

    fn create(builder: serenity::CreateCommandOption) -> serenity::CreateCommandOption {
        StandingsKind::ALL.into_iter().fold(
            builder.kind(serenity::CommandOptionType::String),
            |builder, kind| builder.add_string_choice(kind.display_name(), kind.value()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    NextRace,
    Standings(StandingsKind),
    Support,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(ReplyEmbed),
    Ephemeral(String),
}

/// Presentation settings shared by every command.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    pub time_style: TimeStyle,
    pub season_label: String,
}

pub fn dispatch(
    command: BotCommand,
    calendar: &dyn CalendarSource,
    settings: &ReplySettings,
    now: DateTime<Utc>,
) -> Reply {
    match command {
        BotCommand::NextRace => match next_race(calendar.races(), now) {
            Some(race) => {
                tracing::debug!("Next race is {} at {}", race.name, race.track);
                Reply::Embed(create_schedule_embed(
                    race,
                    settings.time_style,
                    &settings.season_label,
                    now,
                ))
            }
            None => Reply::Text(NO_UPCOMING_RACES.to_string()),
        },
        BotCommand::Standings(StandingsKind::Riders) => {
            let riders = calendar.riders();
            let top = &riders[..riders.len().min(RIDER_STANDINGS_LIMIT)];
            Reply::Embed(create_riders_embed(top, &settings.season_label))
        }
        BotCommand::Standings(StandingsKind::Constructors) => Reply::Embed(
            create_constructors_embed(calendar.constructors(), &settings.season_label),
        ),
        BotCommand::Support => Reply::Ephemeral(SUPPORT_MESSAGE.to_string()),
    }
}
