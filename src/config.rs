use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SCHEDULE_URL: &str = "https://huskers.com/sports/volleyball/schedule";
pub const DEFAULT_LOGO_DIR: &str = "Logos";
pub const DEFAULT_OUTPUT: &str = "nebraska_volleyball_schedule.html";
pub const DEFAULT_BACKGROUND: &str = "Arena.jpg";
pub const DEFAULT_TEAM: &str = "Nebraska";
pub const DEFAULT_SPORT: &str = "Volleyball";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid schedule URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
    #[error("team name must not be empty")]
    EmptyTeam,
}

/// Everything the report page needs besides the scraped data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub team: String,
    pub sport: String,
    /// Logo directory as referenced from the generated page.
    pub logo_href: String,
    pub background: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.to_string(),
            sport: DEFAULT_SPORT.to_string(),
            logo_href: DEFAULT_LOGO_DIR.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub schedule_url: Url,
    pub logo_dir: PathBuf,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub timeout: Duration,
    pub report: ReportSettings,
}

impl Config {
    pub fn new(
        schedule_url: &str,
        logo_dir: PathBuf,
        output: PathBuf,
        report: ReportSettings,
    ) -> Result<Self, ConfigError> {
        if report.team.trim().is_empty() {
            return Err(ConfigError::EmptyTeam);
        }

        Ok(Self {
            schedule_url: parse_schedule_url(schedule_url)?,
            logo_dir,
            output,
            json_output: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report,
        })
    }

    pub fn with_json_output(mut self, path: Option<PathBuf>) -> Self {
        self.json_output = path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn parse_schedule_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
