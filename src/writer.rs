use crate::models::{Schedule, SummaryState};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}

impl WriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a SummaryState,
}

/// Write the rendered report, replacing any previous file.
pub fn write_report(path: &Path, html: &str) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|e| WriteError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(8192, file);
    writer
        .write_all(html.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| WriteError::io(path, e))?;

    info!("Wrote report to {}", path.display());
    Ok(())
}

/// One JSON object per game, then a trailing summary line.
pub fn write_records_jsonl(path: &Path, schedule: &Schedule) -> Result<usize, WriteError> {
    let file = File::create(path).map_err(|e| WriteError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(8192, file);

    let mut lines = Vec::with_capacity(schedule.records.len() + 1);
    for record in &schedule.records {
        lines.push(serde_json::to_string(record)?);
    }
    lines.push(serde_json::to_string(&SummaryLine {
        summary: &schedule.summary,
    })?);

    for line in &lines {
        writeln!(writer, "{}", line).map_err(|e| WriteError::io(path, e))?;
    }
    writer.flush().map_err(|e| WriteError::io(path, e))?;

    info!("Wrote {} records to {}", schedule.records.len(), path.display());
    Ok(schedule.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;
    use std::fs;

    #[test]
    fn report_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.html");
        fs::write(&path, "old contents that are longer than the new ones").unwrap();

        write_report(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn report_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("schedule.html");

        let err = write_report(&path, "<html></html>").unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }

    #[test]
    fn jsonl_has_one_line_per_game_plus_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let schedule = Schedule {
            records: vec![sample_record("#1"), sample_record("")],
            summary: SummaryState {
                overall_record: "2-0".to_string(),
                conference_record: "1-0".to_string(),
                most_recent_rank: "#1".to_string(),
            },
        };

        assert_eq!(write_records_jsonl(&path, &schedule).unwrap(), 2);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["outcome"], "W");
        assert_eq!(first["venue"], "Home");
        assert_eq!(first["team_rank"], "#1");

        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["summary"]["overall_record"], "2-0");
    }
}
