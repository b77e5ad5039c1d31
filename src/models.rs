use serde::Serialize;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";
pub const TO_BE_DETERMINED: &str = "TBD";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
    Neutral,
    Unknown,
}

impl Venue {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "home" => Venue::Home,
            "away" => Venue::Away,
            "neutral" => Venue::Neutral,
            _ => Venue::Unknown,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
            Venue::Neutral => "Neutral",
            Venue::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Result of a game. `Pending` covers games not played yet.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "")]
    Pending,
}

impl Outcome {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "W" => Outcome::Win,
            "L" => Outcome::Loss,
            _ => Outcome::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Pending => "",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub venue: Venue,
    pub day: String,
    pub date: String,
    pub result_or_time: String,
    pub outcome: Outcome,
    pub team_rank: String,
    pub opponent_name: String,
    pub opponent_rank: String,
    pub opponent_logo: String,
    pub location: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SummaryState {
    pub overall_record: String,
    pub conference_record: String,
    pub most_recent_rank: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub records: Vec<GameRecord>,
    pub summary: SummaryState,
}

/// The team's rank as of the latest listed game that carries one.
pub fn most_recent_rank<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    records.into_iter().fold(String::new(), |current, record| {
        if record.team_rank.is_empty() {
            current
        } else {
            record.team_rank.clone()
        }
    })
}

/// Collapse a doubled leading hash ("##7") into a single one.
pub fn normalize_rank(rank: &str) -> String {
    match rank.strip_prefix("##") {
        Some(rest) => format!("#{rest}"),
        None => rank.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn sample_record(team_rank: &str) -> GameRecord {
    GameRecord {
        venue: Venue::Home,
        day: "Fri".to_string(),
        date: "Aug 30".to_string(),
        result_or_time: "3-0".to_string(),
        outcome: Outcome::Win,
        team_rank: team_rank.to_string(),
        opponent_name: "Kentucky".to_string(),
        opponent_rank: String::new(),
        opponent_logo: String::new(),
        location: "Lincoln, Neb.".to_string(),
    }
}
