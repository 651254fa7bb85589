use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single on-track session, already normalized to an absolute instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub label: String,
    pub starts_at: DateTime<Utc>,
}

/// A race weekend. Sessions keep the order they were listed in the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Race {
    pub name: String,
    pub track: String,
    pub sessions: Vec<Session>,
}

impl Race {
    pub fn has_session_after(&self, now: DateTime<Utc>) -> bool {
        self.sessions.iter().any(|session| session.starts_at > now)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rider {
    pub rank: u32,
    pub name: String,
    pub team: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Constructor {
    pub team: String,
    pub points: f64,
}

/// Race exactly as it appears in the data file, before timestamps are resolved.
#[derive(Debug, Deserialize)]
pub struct RawRace {
    pub name: String,
    pub track: String,
    #[serde(deserialize_with = "ordered_sessions")]
    pub sessions: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
pub struct RawCalendar {
    pub races: Vec<RawRace>,
    #[serde(default)]
    pub riders: Vec<Rider>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
}

/// Reads a JSON object into `(label, timestamp)` pairs in document order,
/// rejecting repeated labels.
fn ordered_sessions<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SessionsVisitor;

    impl<'de> Visitor<'de> for SessionsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of session label to timestamp")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut sessions: Vec<(String, String)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((label, time)) = map.next_entry::<String, String>()? {
                if sessions.iter().any(|(existing, _)| *existing == label) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate session label {:?}",
                        label
                    )));
                }
                sessions.push((label, time));
            }
            Ok(sessions)
        }
    }

    deserializer.deserialize_map(SessionsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sessions_keep_document_order() {
        let json = r#"{
            "name": "Grand Prix of Qatar",
            "track": "Lusail",
            "sessions": {
                "Race": "2025-03-02 17:00",
                "Free Practice 1": "2025-02-28 13:45",
                "Sprint": "2025-03-01 18:00"
            }
        }"#;
        let race: RawRace = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = race.sessions.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Race", "Free Practice 1", "Sprint"]);
    }

    #[test]
    fn duplicate_session_label_is_rejected() {
        let json = r#"{
            "name": "X",
            "track": "Y",
            "sessions": { "Race": "2025-03-02 17:00", "Race": "2025-03-03 17:00" }
        }"#;
        let err = serde_json::from_str::<RawRace>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate session label"));
    }

    #[test]
    fn standings_tables_are_optional() {
        let calendar: RawCalendar = serde_json::from_str(r#"{ "races": [] }"#).unwrap();
        assert!(calendar.riders.is_empty());
        assert!(calendar.constructors.is_empty());
    }

    #[test]
    fn has_session_after_is_strict() {
        let t = Utc.with_ymd_and_hms(2025, 3, 2, 17, 0, 0).unwrap();
        let race = Race {
            name: "R".into(),
            track: "T".into(),
            sessions: vec![Session { label: "Race".into(), starts_at: t }],
        };
        assert!(!race.has_session_after(t));
        assert!(race.has_session_after(t - chrono::Duration::seconds(1)));
    }
}
