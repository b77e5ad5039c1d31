use log::{debug, warn};
use std::path::PathBuf;

const LOGO_EXTENSION: &str = "png";

/// Maps team names onto image files in a local logo directory.
#[derive(Debug, Clone)]
pub struct LogoResolver {
    dir: PathBuf,
}

impl LogoResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// "Iowa State" -> "iowa_state.png"
    pub fn file_name(team: &str) -> String {
        format!("{}.{}", team.to_lowercase().replace(' ', "_"), LOGO_EXTENSION)
    }

    /// File name of the team's logo, or an empty string if there is none on disk.
    pub fn resolve(&self, team: &str) -> String {
        if team.is_empty() {
            debug!("Skipping logo lookup for unnamed team");
            return String::new();
        }

        let file_name = Self::file_name(team);
        if self.dir.join(&file_name).is_file() {
            file_name
        } else {
            warn!("Logo for '{}' not found.", team);
            String::new()
        }
    }
}
