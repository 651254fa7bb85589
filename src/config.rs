use anyhow::Result;
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;

/// How an absolute session time is rendered in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    /// Discord `<t:unix:f>` token, shown in each reader's own timezone.
    Discord,
    /// Plain date string in the configured display offset.
    Formatted(FixedOffset),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub client_id: Option<u64>,
    pub races_file: PathBuf,
    pub source_offset: FixedOffset,
    pub time_style: TimeStyle,
    pub season_label: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .or_else(|_| env::var("TOKEN"))
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let client_id = match env::var("CLIENT_ID") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id != 0)
                    .ok_or_else(|| anyhow::anyhow!("CLIENT_ID must be a numeric id, got {:?}", raw))?,
            ),
            Err(_) => None,
        };

        let races_file = env::var("RACES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("races.json"));

        let source_offset =
            parse_utc_offset(&env::var("SOURCE_UTC_OFFSET").unwrap_or_else(|_| "+00:00".into()))?;
        let display_offset =
            parse_utc_offset(&env::var("DISPLAY_UTC_OFFSET").unwrap_or_else(|_| "+00:00".into()))?;

        let time_style = parse_time_style(
            &env::var("TIME_STYLE").unwrap_or_else(|_| "discord".into()),
            display_offset,
        )?;

        let season_label = env::var("SEASON_LABEL").unwrap_or_else(|_| "MotoGP 2025".to_string());

        Ok(Config {
            discord_token,
            client_id,
            races_file,
            source_offset,
            time_style,
            season_label,
        })
    }
}

/// Parses `+HH:MM`, `-HH:MM` or `Z` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("invalid offset"));
    }

    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(anyhow::anyhow!("Invalid UTC offset {:?}. Use +HH:MM or -HH:MM", raw)),
    };

    let (hours, minutes) = rest
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Invalid UTC offset {:?}. Use +HH:MM or -HH:MM", raw))?;
    let hours = parse_offset_part(hours, 23)
        .ok_or_else(|| anyhow::anyhow!("Invalid hours in UTC offset {:?}", raw))?;
    let minutes = parse_offset_part(minutes, 59)
        .ok_or_else(|| anyhow::anyhow!("Invalid minutes in UTC offset {:?}", raw))?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow::anyhow!("UTC offset {:?} is out of range", raw))
}

/// Two unsigned digits no greater than `max`.
fn parse_offset_part(part: &str, max: i32) -> Option<i32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok().filter(|value| *value <= max)
}

pub fn parse_time_style(raw: &str, display_offset: FixedOffset) -> Result<TimeStyle> {
    match raw.trim().to_lowercase().as_str() {
        "discord" => Ok(TimeStyle::Discord),
        "formatted" => Ok(TimeStyle::Formatted(display_offset)),
        other => Err(anyhow::anyhow!(
            "Invalid TIME_STYLE {:?}. Use \"discord\" or \"formatted\"",
            other
        )),
    }
}
