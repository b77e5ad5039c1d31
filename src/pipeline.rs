use anyhow::Context;
use log::info;

use crate::config::Config;
use crate::http_client::HttpClient;
use crate::logos::LogoResolver;
use crate::models::Schedule;
use crate::parser;
use crate::render;
use crate::selectors::SIDEARM;
use crate::writer::{self, WriteError};

/// Render the schedule and write the report (plus the JSON dump, if asked for).
pub fn publish(schedule: &Schedule, config: &Config, logos: &LogoResolver) -> Result<(), WriteError> {
    let team_logo = logos.resolve(&config.report.team);
    let html = render::render_report(schedule, &config.report, &team_logo);
    writer::write_report(&config.output, &html)?;

    if let Some(path) = &config.json_output {
        writer::write_records_jsonl(path, schedule)?;
    }
    Ok(())
}

/// Fetch, extract, render. One pass, no retries.
pub async fn run(config: &Config) -> anyhow::Result<Schedule> {
    let client = HttpClient::new(config.timeout).context("Failed to create HTTP client")?;
    let html = client
        .fetch(&config.schedule_url)
        .await
        .with_context(|| format!("Failed to fetch {}", config.schedule_url))?;

    let logos = LogoResolver::new(&config.logo_dir);
    let schedule = parser::parse_schedule(&html, &SIDEARM, &logos)
        .context("Failed to parse schedule page")?;
    info!(
        "Extracted {} games (overall '{}', conf '{}', rank '{}')",
        schedule.records.len(),
        schedule.summary.overall_record,
        schedule.summary.conference_record,
        schedule.summary.most_recent_rank
    );

    publish(&schedule, config, &logos)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    Ok(schedule)
}
