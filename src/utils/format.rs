use crate::calendar::models::{Constructor, Race, Rider};
use crate::config::TimeStyle;
use crate::utils::time::{discord_timestamp, format_countdown, format_datetime_in};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

pub const SCHEDULE_COLOR: u32 = 0xff0000; // Red
pub const STANDINGS_COLOR: u32 = 0xffd700; // Gold

/// Discord rejects embeds with more fields than this.
pub const MAX_EMBED_FIELDS: usize = 25;

pub const NO_UPCOMING_RACES: &str = "🎉 No upcoming races!";

pub const SUPPORT_MESSAGE: &str = "☕ Support the developer:\n\
[Buy me a coffee](https://buymeacoffee.com/pramu.cc)\n\
🌐 Website: [vishwapramuditha.com](https://vishwapramuditha.com)";

/// Session category, used only to pick a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Practice,
    Qualifying,
    Sprint,
    WarmUp,
    Race,
    Other,
}

impl SessionKind {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "free practice 1" | "free practice 2" | "practice" => SessionKind::Practice,
            "qualifying 1" | "qualifying 2" | "qualifying" => SessionKind::Qualifying,
            "sprint" => SessionKind::Sprint,
            "warm up" => SessionKind::WarmUp,
            "race" => SessionKind::Race,
            _ => SessionKind::Other,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SessionKind::Practice => "🟢",
            SessionKind::Qualifying => "🏎️",
            SessionKind::Sprint => "⚡",
            SessionKind::WarmUp => "☀️",
            SessionKind::Race => "🏁",
            SessionKind::Other => "📌",
        }
    }
}

pub fn session_glyph(label: &str) -> &'static str {
    SessionKind::from_label(label).glyph()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Renderer-independent embed contents. Converted to a serenity embed only
/// when the reply is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEmbed {
    pub title: String,
    pub color: u32,
    pub footer: String,
    pub fields: Vec<EmbedField>,
}

impl ReplyEmbed {
    /// Splits the fields over as many embeds as needed. Only the first page
    /// carries the title and only the last carries the footer.
    pub fn pages(&self) -> Vec<ReplyEmbed> {
        if self.fields.len() <= MAX_EMBED_FIELDS {
            return vec![self.clone()];
        }

        let chunks: Vec<&[EmbedField]> = self.fields.chunks(MAX_EMBED_FIELDS).collect();
        let last = chunks.len() - 1;
        chunks
            .into_iter()
            .enumerate()
            .map(|(index, fields)| ReplyEmbed {
                title: if index == 0 { self.title.clone() } else { String::new() },
                color: self.color,
                footer: if index == last { self.footer.clone() } else { String::new() },
                fields: fields.to_vec(),
            })
            .collect()
    }

    pub fn to_create_embed(&self) -> serenity::CreateEmbed {
        let fields = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone(), field.inline));

        let mut embed = serenity::CreateEmbed::new().color(self.color).fields(fields);
        if !self.title.is_empty() {
            embed = embed.title(&self.title);
        }
        if !self.footer.is_empty() {
            embed = embed.footer(serenity::CreateEmbedFooter::new(&self.footer));
        }
        embed
    }
}

pub fn format_session_time(instant: DateTime<Utc>, style: TimeStyle) -> String {
    match style {
        TimeStyle::Discord => discord_timestamp(instant),
        TimeStyle::Formatted(offset) => format_datetime_in(instant, offset),
    }
}

/// One field per session, in the race's own session order.
pub fn schedule_fields(race: &Race, style: TimeStyle, now: DateTime<Utc>) -> Vec<EmbedField> {
    race.sessions
        .iter()
        .map(|session| EmbedField {
            name: format!("{} {}", session_glyph(&session.label), session.label),
            value: format!(
                "{} | ⏱ {}",
                format_session_time(session.starts_at, style),
                format_countdown(session.starts_at, now)
            ),
            inline: false,
        })
        .collect()
}

pub fn create_schedule_embed(
    race: &Race,
    style: TimeStyle,
    season: &str,
    now: DateTime<Utc>,
) -> ReplyEmbed {
    ReplyEmbed {
        title: format!("🏁 {} - {}", race.name, race.track),
        color: SCHEDULE_COLOR,
        footer: format!("{} Schedule", season),
        fields: schedule_fields(race, style, now),
    }
}

pub fn create_riders_embed(riders: &[Rider], season: &str) -> ReplyEmbed {
    let fields = riders
        .iter()
        .map(|rider| EmbedField {
            name: format!("#{} {} ({})", rider.rank, rider.name, rider.team),
            value: format!("Points: {}", rider.points),
            inline: true,
        })
        .collect();

    ReplyEmbed {
        title: "🏆 Riders Championship Standings".to_string(),
        color: STANDINGS_COLOR,
        footer: format!("{} Championship", season),
        fields,
    }
}

pub fn create_constructors_embed(constructors: &[Constructor], season: &str) -> ReplyEmbed {
    let fields = constructors
        .iter()
        .map(|constructor| EmbedField {
            name: constructor.team.clone(),
            value: format!("Points: {}", constructor.points),
            inline: true,
        })
        .collect();

    ReplyEmbed {
        title: "🏎️ Constructors Championship Standings".to_string(),
        color: STANDINGS_COLOR,
        footer: format!("{} Championship", season),
        fields,
    }
}

pub fn format_error_message(error: &str) -> String {
    format!("❌ **Error**: {}", error)
}
