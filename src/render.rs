use crate::config::ReportSettings;
use crate::models::{GameRecord, Outcome, Schedule};
use crate::text::escape_html;

fn style(background: &str) -> String {
    format!(
        r#"    <style>
        body {{
            font-family: Arial, sans-serif;
            background: url('{background}') no-repeat center center fixed;
            background-size: cover;
            padding: 20px;
            color: white;
            font-size: 12px;
            display: flex;
            flex-direction: row;
        }}
        .left-section {{
            width: 40%;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: flex-start;
            position: relative;
        }}
        .left-section img {{
            width: 80%;
            margin-bottom: 5px;
            filter: drop-shadow(8px 8px 12px rgba(0, 0, 0, 0.9));
        }}
        .text-box {{
            background-color: rgba(0, 0, 0, 0.6);
            padding: 10px;
            border-radius: 5px;
            text-align: center;
            margin-bottom: 10px;
        }}
        .ranking {{
            font-size: 36px;
            text-shadow: 4px 4px 8px rgba(0, 0, 0, 0.9);
            margin-bottom: 5px;
        }}
        .left-section h1 {{
            font-size: 42px;
            text-shadow: 6px 6px 10px rgba(0, 0, 0, 0.9);
        }}
        .left-section h2, .left-section h3 {{
            font-size: 28px;
            text-shadow: 4px 4px 8px rgba(0, 0, 0, 0.9);
        }}
        table {{
            width: 60%;
            margin: auto;
            border-collapse: collapse;
            background-color: rgba(255, 255, 255, 0.9);
            border: 1px solid #ddd;
            text-align: center;
            color: black;
        }}
        th, td {{
            padding: 2px;
            border: 1px solid #ddd;
            line-height: 1.0;
        }}
        th {{
            background-color: rgba(255, 255, 255, 0.7);
        }}
        td img {{
            vertical-align: middle;
            width: 40px;
            margin-right: 8px;
        }}
        td.left-align {{
            text-align: left;
        }}
        .outcome-w {{
            color: green;
        }}
        .outcome-l {{
            color: red;
        }}
        .date-info {{
            display: flex;
            justify-content: space-between;
        }}
    </style>
"#,
        background = escape_html(background)
    )
}

/// Relative `src` for a resolved logo; empty when no logo was found.
pub fn logo_src(logo_href: &str, file_name: &str) -> String {
    if file_name.is_empty() {
        String::new()
    } else {
        format!("{}/{}", logo_href.trim_end_matches('/'), file_name)
    }
}

pub fn outcome_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "outcome-w",
        Outcome::Loss => "outcome-l",
        Outcome::Pending => "",
    }
}

fn opponent_cell(game: &GameRecord, logo_href: &str) -> String {
    let name = escape_html(&game.opponent_name);
    let img = format!(
        r#"<img src="{}" alt="{} Logo">"#,
        escape_html(&logo_src(logo_href, &game.opponent_logo)),
        name
    );
    if game.opponent_rank.is_empty() {
        format!("{img} {name}")
    } else {
        format!("{img} {} {name}", escape_html(&game.opponent_rank))
    }
}

fn game_row(game: &GameRecord, logo_href: &str) -> String {
    format!(
        r#"
        <tr>
            <td><div class="date-info">{date}<span>{day}</span></div></td>
            <td>{venue}</td>
            <td class="left-align">{opponent}</td>
            <td class="{class}">{outcome}</td>
            <td>{result}</td>
        </tr>"#,
        date = escape_html(&game.date),
        day = escape_html(&game.day),
        venue = game.venue,
        opponent = opponent_cell(game, logo_href),
        class = outcome_class(game.outcome),
        outcome = game.outcome,
        result = escape_html(&game.result_or_time),
    )
}

/// Render the full standalone report page.
///
/// `team_logo` is the resolved file name of the team's own logo (may be empty).
pub fn render_report(schedule: &Schedule, settings: &ReportSettings, team_logo: &str) -> String {
    let team = escape_html(&settings.team);
    let summary = &schedule.summary;
    let mut page = String::new();

    page.push_str("<html>\n<head>\n");
    page.push_str(&format!(
        "    <title>{} {} Schedule</title>\n",
        team,
        escape_html(&settings.sport)
    ));
    page.push_str(&style(&settings.background));
    page.push_str("</head>\n<body>\n");

    page.push_str(&format!(
        r#"    <div class="left-section">
        <img src="{}" alt="{} Logo">
        <div class="text-box">
            <h1>{}</h1>"#,
        escape_html(&logo_src(&settings.logo_href, team_logo)),
        team,
        escape_html(&settings.sport.to_uppercase())
    ));

    if !summary.most_recent_rank.is_empty() {
        page.push_str(&format!(
            r#"
            <div class="ranking">Current Ranking: #{}</div>"#,
            escape_html(summary.most_recent_rank.trim_start_matches('#'))
        ));
    }

    page.push_str(&format!(
        r#"
            <h2>Overall: {}</h2>
            <h3>Conf: {}</h3>
        </div>
    </div>
    <table>
        <tr>
            <th>Date</th>
            <th>Location</th>
            <th>Opponent</th>
            <th>W/L</th>
            <th>Score</th>
        </tr>"#,
        escape_html(&summary.overall_record),
        escape_html(&summary.conference_record)
    ));

    for game in &schedule.records {
        page.push_str(&game_row(game, &settings.logo_href));
    }

    page.push_str("\n    </table>\n</body>\n</html>\n");
    page
}
