pub mod models;

use crate::utils::time::parse_session_time;
use chrono::{DateTime, FixedOffset, Utc};
use models::{Constructor, Race, RawCalendar, Rider, Session};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to read calendar file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("calendar data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("race {race:?} has an unreadable time {value:?} for session {session:?}")]
    Timestamp {
        race: String,
        session: String,
        value: String,
    },
}

/// Read-only view of the race calendar and championship tables.
pub trait CalendarSource: Send + Sync {
    /// Races in calendar order.
    fn races(&self) -> &[Race];
    /// Riders in championship order.
    fn riders(&self) -> &[Rider];
    fn constructors(&self) -> &[Constructor];
}

/// Calendar loaded once at startup from the bundled JSON file.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    races: Vec<Race>,
    riders: Vec<Rider>,
    constructors: Vec<Constructor>,
}

impl Calendar {
    pub fn new(races: Vec<Race>, riders: Vec<Rider>, constructors: Vec<Constructor>) -> Self {
        Self {
            races,
            riders,
            constructors,
        }
    }

    pub fn load(path: &Path, source_offset: FixedOffset) -> Result<Self, CalendarError> {
        let json = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let calendar = Self::from_json(&json, source_offset)?;

        tracing::info!(
            "Loaded calendar from {}: {} races, {} riders, {} constructors",
            path.display(),
            calendar.races.len(),
            calendar.riders.len(),
            calendar.constructors.len()
        );

        Ok(calendar)
    }

    /// Parses the calendar document, normalizing every session time to UTC.
    /// Times without an offset are read in `source_offset`.
    pub fn from_json(json: &str, source_offset: FixedOffset) -> Result<Self, CalendarError> {
        let raw: RawCalendar = serde_json::from_str(json)?;

        let mut races = Vec::with_capacity(raw.races.len());
        for raw_race in raw.races {
            let mut sessions = Vec::with_capacity(raw_race.sessions.len());
            for (label, value) in raw_race.sessions {
                let starts_at = parse_session_time(&value, source_offset).map_err(|_| {
                    CalendarError::Timestamp {
                        race: raw_race.name.clone(),
                        session: label.clone(),
                        value: value.clone(),
                    }
                })?;
                sessions.push(Session { label, starts_at });
            }
            races.push(Race {
                name: raw_race.name,
                track: raw_race.track,
                sessions,
            });
        }

        Ok(Self::new(races, raw.riders, raw.constructors))
    }
}

impl CalendarSource for Calendar {
    fn races(&self) -> &[Race] {
        &self.races
    }

    fn riders(&self) -> &[Rider] {
        &self.riders
    }

    fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

/// First race, in calendar order, with at least one session strictly after `now`.
pub fn next_race(races: &[Race], now: DateTime<Utc>) -> Option<&Race> {
    races.iter().find(|race| race.has_session_after(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn race(name: &str, times: &[(&str, DateTime<Utc>)]) -> Race {
        Race {
            name: name.to_string(),
            track: format!("{} Circuit", name),
            sessions: times
                .iter()
                .map(|(label, starts_at)| Session {
                    label: label.to_string(),
                    starts_at: *starts_at,
                })
                .collect(),
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn next_race_skips_finished_weekends() {
        let now = reference();
        let races = vec![
            race("R0", &[("Race", now - Duration::days(7))]),
            race("R1", &[("Race", now + Duration::days(7))]),
            race("R2", &[("Race", now + Duration::days(14))]),
        ];
        assert_eq!(next_race(&races, now).map(|r| r.name.as_str()), Some("R1"));
    }

    #[test]
    fn weekend_in_progress_is_still_next() {
        let now = reference();
        let races = vec![
            race(
                "R1",
                &[
                    ("Practice", now - Duration::hours(20)),
                    ("Race", now + Duration::minutes(150)),
                ],
            ),
            race("R2", &[("Race", now + Duration::days(14))]),
        ];
        assert_eq!(next_race(&races, now).map(|r| r.name.as_str()), Some("R1"));
    }

    #[test]
    fn stored_order_wins_over_chronology() {
        let now = reference();
        let races = vec![
            race("Later", &[("Race", now + Duration::days(30))]),
            race("Sooner", &[("Race", now + Duration::days(1))]),
        ];
        assert_eq!(next_race(&races, now).map(|r| r.name.as_str()), Some("Later"));
    }

    #[test]
    fn session_exactly_now_is_not_upcoming() {
        let now = reference();
        let races = vec![race("R1", &[("Race", now)])];
        assert!(next_race(&races, now).is_none());
    }

    #[test]
    fn empty_calendar_has_no_next_race() {
        assert!(next_race(&[], reference()).is_none());
    }

    #[test]
    fn from_json_normalizes_naive_and_offset_times() {
        let json = r#"{
            "races": [{
                "name": "Grand Prix of Spain",
                "track": "Jerez",
                "sessions": {
                    "Free Practice 1": "2025-04-25 10:45",
                    "Race": "2025-04-27T14:00:00+02:00"
                }
            }],
            "riders": [{ "rank": 1, "name": "Marc Marquez", "team": "Ducati Lenovo Team", "points": 120 }],
            "constructors": [{ "team": "Ducati", "points": 200 }]
        }"#;
        let source = FixedOffset::east_opt(2 * 3600).unwrap();
        let calendar = Calendar::from_json(json, source).unwrap();

        let sessions = &calendar.races()[0].sessions;
        assert_eq!(sessions[0].label, "Free Practice 1");
        assert_eq!(sessions[0].starts_at, Utc.with_ymd_and_hms(2025, 4, 25, 8, 45, 0).unwrap());
        assert_eq!(sessions[1].starts_at, Utc.with_ymd_and_hms(2025, 4, 27, 12, 0, 0).unwrap());
        assert_eq!(calendar.riders()[0].points, 120.0);
        assert_eq!(calendar.constructors()[0].team, "Ducati");
    }

    #[test]
    fn from_json_reports_bad_timestamp_with_context() {
        let json = r#"{ "races": [{ "name": "GP", "track": "T", "sessions": { "Race": "soon" } }] }"#;
        match Calendar::from_json(json, utc()) {
            Err(CalendarError::Timestamp { race, session, value }) => {
                assert_eq!(race, "GP");
                assert_eq!(session, "Race");
                assert_eq!(value, "soon");
            }
            other => panic!("expected timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        assert!(matches!(
            Calendar::from_json("{ \"races\": 3 }", utc()),
            Err(CalendarError::Json(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let path = Path::new("does/not/exist/races.json");
        assert!(matches!(
            Calendar::load(path, utc()),
            Err(CalendarError::Io { .. })
        ));
    }
}
