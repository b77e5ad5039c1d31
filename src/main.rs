use clap::Parser;
use schedule_scrape::config::{self, Config, ReportSettings};
use schedule_scrape::pipeline;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Scrape a team schedule page into a styled HTML report")]
struct Args {
    /// Schedule page to scrape
    #[arg(long, default_value = config::DEFAULT_SCHEDULE_URL)]
    url: String,
    /// Directory holding team logos named like `iowa_state.png`
    #[arg(long, default_value = config::DEFAULT_LOGO_DIR)]
    logo_dir: PathBuf,
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Background image referenced by the report
    #[arg(long, default_value = config::DEFAULT_BACKGROUND)]
    background: String,
    #[arg(long, default_value = config::DEFAULT_TEAM)]
    team: String,
    #[arg(long, default_value = config::DEFAULT_SPORT)]
    sport: String,
    /// Also dump the extracted games as JSON lines
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let report = ReportSettings {
        team: args.team,
        sport: args.sport,
        logo_href: args.logo_dir.to_string_lossy().replace('\\', "/"),
        background: args.background,
    };
    let config = Config::new(&args.url, args.logo_dir, args.output, report)?
        .with_json_output(args.json)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    pipeline::run(&config).await?;

    println!(
        "Schedule data has been scraped and saved to {}.",
        config.output.display()
    );
    Ok(())
}
