use lol_html::errors::RewritingError;
use lol_html::{element, text, HtmlRewriter, Settings};
use log::debug;
use std::cell::RefCell;

use crate::logos::LogoResolver;
use crate::models::{
    self, GameRecord, Outcome, Schedule, SummaryState, Venue, NOT_AVAILABLE, TO_BE_DETERMINED,
};
use crate::selectors::Markup;
use crate::text::{clean, decode_entities};

const OVERALL_LABEL: &str = "Overall";
const CONFERENCE_LABEL: &str = "Conf.";

/// Text of the first element matching a selector within one item.
#[derive(Debug, Default)]
struct Capture {
    hits: usize,
    raw: String,
}

impl Capture {
    fn open(&mut self) {
        self.hits += 1;
    }

    fn push(&mut self, chunk: &str) {
        if self.hits == 1 {
            self.raw.push_str(chunk);
        }
    }

    fn raw(&self) -> Option<&str> {
        (self.hits > 0).then_some(self.raw.as_str())
    }

    fn value(&self) -> Option<String> {
        self.raw().map(clean)
    }
}

#[derive(Debug, Default)]
struct ItemDraft {
    venue: Capture,
    date_wrapper: bool,
    day: Capture,
    date: Capture,
    played: Capture,
    outcome: Capture,
    result_container: bool,
    pending_time: Capture,
    ranks: Vec<String>,
    opponent: Capture,
    location: Capture,
}

impl ItemDraft {
    fn finish(self, logos: &LogoResolver) -> GameRecord {
        let venue = self
            .venue
            .value()
            .map_or(Venue::Unknown, |label| Venue::from_label(&label));

        let (day, date) = if self.date_wrapper {
            (
                self.day
                    .value()
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.chars().take(3).collect()),
                self.date.value().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            )
        } else {
            (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string())
        };

        let (outcome, result_or_time) = match self.played.raw() {
            Some(full) => {
                let token = self.outcome.value().unwrap_or_default();
                let full = decode_entities(full);
                let score = if token.is_empty() {
                    full.trim().to_string()
                } else {
                    full.replace(&token, "").trim().to_string()
                };
                (Outcome::from_token(&token), score)
            }
            None => {
                let time = self
                    .pending_time
                    .value()
                    .filter(|_| self.result_container)
                    .unwrap_or_else(|| TO_BE_DETERMINED.to_string());
                (Outcome::Pending, time)
            }
        };

        let team_rank = self.ranks.first().map(|r| clean(r)).unwrap_or_default();
        let opponent_rank = self
            .ranks
            .get(1)
            .map(|r| models::normalize_rank(&clean(r)))
            .unwrap_or_default();

        let opponent_name = self.opponent.value().unwrap_or_default();
        let opponent_logo = logos.resolve(&opponent_name);
        let location = self
            .location
            .value()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        GameRecord {
            venue,
            day,
            date,
            result_or_time,
            outcome,
            team_rank,
            opponent_name,
            opponent_rank,
            opponent_logo,
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Overall,
    Conference,
}

#[derive(Debug, Default)]
struct SummaryDraft {
    label: Option<String>,
    located: Vec<Stat>,
    awaiting: Vec<Stat>,
    /// Value text being collected, with the labels waiting on it.
    value: Option<(Vec<Stat>, String)>,
    overall: Option<String>,
    conference: Option<String>,
}

impl SummaryDraft {
    fn label_done(&mut self, label: &str) {
        let stat = match decode_entities(label).as_str() {
            OVERALL_LABEL => Stat::Overall,
            CONFERENCE_LABEL => Stat::Conference,
            _ => return,
        };
        if !self.located.contains(&stat) {
            self.located.push(stat);
            self.awaiting.push(stat);
        }
    }

    /// A value element starts: the previous one is complete by now.
    fn open_value(&mut self) {
        self.finish_value();
        if !self.awaiting.is_empty() {
            self.value = Some((std::mem::take(&mut self.awaiting), String::new()));
        }
    }

    fn push_value(&mut self, chunk: &str) {
        if let Some((_, value)) = self.value.as_mut() {
            value.push_str(chunk);
        }
    }

    fn finish_value(&mut self) {
        let Some((targets, value)) = self.value.take() else {
            return;
        };
        let value = clean(&value);
        for stat in targets {
            match stat {
                Stat::Overall => self.overall = Some(value.clone()),
                Stat::Conference => self.conference = Some(value.clone()),
            }
        }
    }
}

#[derive(Debug, Default)]
struct ParseState {
    items: Vec<ItemDraft>,
    summary: SummaryDraft,
}

impl ParseState {
    fn current(&mut self) -> Option<&mut ItemDraft> {
        self.items.last_mut()
    }
}

fn has_class(class_attr: Option<String>, class: &str) -> bool {
    class_attr.is_some_and(|attr| attr.split_whitespace().any(|c| c == class))
}

/// Extract every game and the season summary from a schedule page.
pub fn parse_schedule(
    input: &str,
    markup: &Markup,
    logos: &LogoResolver,
) -> Result<Schedule, RewritingError> {
    let state = RefCell::new(ParseState::default());

    let stats_label = markup.in_stats(markup.stats_label);
    let venue = markup.in_item(&[markup.venue]);
    let date_wrapper = markup.in_item(&[markup.date_wrapper]);
    let day = markup.in_item(&[markup.date_wrapper, markup.day]);
    let date_label = markup.in_item(&[markup.date_wrapper, markup.date_label]);
    let played = markup.in_item(&[markup.played_result]);
    let outcome = markup.in_item(&[markup.played_result, markup.outcome_token]);
    let result_container = markup.in_item(&[markup.result_container]);
    let pending_time = markup.in_item(&[markup.result_container, markup.pending_time]);
    let rank = markup.in_item(&[markup.rank]);
    let opponent = markup.in_item(&[markup.opponent_name]);
    let location = markup.in_item(&[markup.location]);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                // Season summary labels and their values
                element!(stats_label.as_str(), |el| {
                    let mut state = state.borrow_mut();
                    if !has_class(el.get_attribute("class"), markup.stats_value_class) {
                        state.summary.label = Some(String::new());
                    }
                    Ok(())
                }),
                text!(stats_label.as_str(), |t| {
                    let mut state = state.borrow_mut();
                    let summary = &mut state.summary;
                    if let Some(label) = summary.label.as_mut() {
                        label.push_str(t.as_str());
                        if t.last_in_text_node()
                            && let Some(label) = summary.label.take()
                        {
                            summary.label_done(&label);
                        }
                    }
                    Ok(())
                }),
                element!(markup.stats_value, |_el| {
                    let mut state = state.borrow_mut();
                    let summary = &mut state.summary;
                    summary.label = None;
                    summary.open_value();
                    Ok(())
                }),
                text!(markup.stats_value, |t| {
                    state.borrow_mut().summary.push_value(t.as_str());
                    Ok(())
                }),
                // One draft per schedule item
                element!(markup.item, |_el| {
                    state.borrow_mut().items.push(ItemDraft::default());
                    Ok(())
                }),
                element!(venue.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.venue.open();
                    }
                    Ok(())
                }),
                text!(venue.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.venue.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(date_wrapper.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.date_wrapper = true;
                    }
                    Ok(())
                }),
                element!(day.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.day.open();
                    }
                    Ok(())
                }),
                text!(day.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.day.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(date_label.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.date.open();
                    }
                    Ok(())
                }),
                text!(date_label.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.date.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(played.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.played.open();
                    }
                    Ok(())
                }),
                text!(played.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.played.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(outcome.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.outcome.open();
                    }
                    Ok(())
                }),
                text!(outcome.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.outcome.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(result_container.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.result_container = true;
                    }
                    Ok(())
                }),
                element!(pending_time.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.pending_time.open();
                    }
                    Ok(())
                }),
                text!(pending_time.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.pending_time.push(t.as_str());
                    }
                    Ok(())
                }),
                // First rank marker is ours, the second belongs to the opponent
                element!(rank.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.ranks.push(String::new());
                    }
                    Ok(())
                }),
                text!(rank.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current()
                        && let Some(rank) = item.ranks.last_mut()
                    {
                        rank.push_str(t.as_str());
                    }
                    Ok(())
                }),
                element!(opponent.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.opponent.open();
                    }
                    Ok(())
                }),
                text!(opponent.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.opponent.push(t.as_str());
                    }
                    Ok(())
                }),
                element!(location.as_str(), |_el| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.location.open();
                    }
                    Ok(())
                }),
                text!(location.as_str(), |t| {
                    if let Some(item) = state.borrow_mut().current() {
                        item.location.push(t.as_str());
                    }
                    Ok(())
                }),
            ],
            ..Settings::new()
        },
        |_: &[u8]| {},
    );

    rewriter.write(input.as_bytes())?;
    rewriter.end()?;

    let ParseState { items, mut summary } = state.into_inner();
    summary.finish_value();
    debug!("Found {} schedule items", items.len());

    let records: Vec<GameRecord> = items
        .into_iter()
        .map(|item| {
            let record = item.finish(logos);
            debug!("Parsed game: {:?}", record);
            record
        })
        .collect();

    let summary = SummaryState {
        overall_record: summary.overall.unwrap_or_default(),
        conference_record: summary.conference.unwrap_or_default(),
        most_recent_rank: models::most_recent_rank(&records),
    };

    Ok(Schedule { records, summary })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::selectors::SIDEARM;
    use std::fs;

    fn no_logos() -> LogoResolver {
        LogoResolver::new("no/such/logo/dir")
    }

    #[test]
    fn empty_page_has_no_records() {
        let schedule = parse_schedule("<html><body><p>No games</p></body></html>", &SIDEARM, &no_logos())
            .unwrap();
        assert!(schedule.records.is_empty());
        assert_eq!(schedule.summary, SummaryState::default());
    }

    #[test]
    fn reads_summary_records() {
        let schedule = parse_schedule(&page(&[STATS]), &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.summary.overall_record, "20-2");
        assert_eq!(schedule.summary.conference_record, "12-1");
    }

    #[test]
    fn missing_summary_section_leaves_fields_empty() {
        let html = page(&[
            r#"<div><strong>Overall</strong><strong class="schedule-stats-item__value">1-1</strong></div>"#,
            PLAYED_IOWA,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.summary.overall_record, "");
        assert_eq!(schedule.summary.conference_record, "");
        assert_eq!(schedule.records.len(), 1);
    }

    #[test]
    fn summary_value_joins_nested_text() {
        let html = page(&[
            r#"<section class="schedule-stats">
  <strong>Overall</strong><strong class="schedule-stats-item__value"><span>20</span>-2</strong>
  <strong>Conf.</strong><strong class="schedule-stats-item__value">12-<em>1</em></strong>
</section>"#,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.summary.overall_record, "20-2");
        assert_eq!(schedule.summary.conference_record, "12-1");
    }

    #[test]
    fn missing_conference_label_only_skips_that_field() {
        let html = page(&[
            r#"<section class="schedule-stats"><strong>Overall</strong><strong class="schedule-stats-item__value">9-0</strong></section>"#,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.summary.overall_record, "9-0");
        assert_eq!(schedule.summary.conference_record, "");
    }

    #[test]
    fn played_game_splits_outcome_and_score() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("iowa.png"), b"png").unwrap();
        let logos = LogoResolver::new(dir.path());

        let schedule = parse_schedule(&page(&[PLAYED_IOWA]), &SIDEARM, &logos).unwrap();
        let game = &schedule.records[0];

        assert_eq!(game.venue, Venue::Home);
        assert_eq!(game.day, "Fri");
        assert_eq!(game.date, "Sep 6");
        assert_eq!(game.outcome, Outcome::Win);
        assert_eq!(game.result_or_time, "3-1");
        assert_eq!(game.team_rank, "#2");
        assert_eq!(game.opponent_rank, "#5");
        assert_eq!(game.opponent_name, "Iowa");
        assert_eq!(game.opponent_logo, "iowa.png");
        assert_eq!(game.location, "Lincoln, Neb.");
    }

    #[test]
    fn upcoming_game_keeps_time() {
        let schedule = parse_schedule(&page(&[UPCOMING_PURDUE]), &SIDEARM, &no_logos()).unwrap();
        let game = &schedule.records[0];

        assert_eq!(game.venue, Venue::Away);
        assert_eq!(game.day, "Sat");
        assert_eq!(game.outcome, Outcome::Pending);
        assert_eq!(game.result_or_time, "7:00 PM");
        assert_eq!(game.team_rank, "");
        assert_eq!(game.opponent_rank, "");
        assert_eq!(game.opponent_logo, "");
    }

    #[test]
    fn bare_item_falls_back_to_defaults() {
        let html = page(&[r#"<div class="schedule-event-item"><p>Bye week</p></div>"#]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        let game = &schedule.records[0];

        assert_eq!(game.venue, Venue::Unknown);
        assert_eq!(game.day, NOT_AVAILABLE);
        assert_eq!(game.date, NOT_AVAILABLE);
        assert_eq!(game.result_or_time, TO_BE_DETERMINED);
        assert_eq!(game.outcome, Outcome::Pending);
        assert_eq!(game.opponent_name, "");
        assert_eq!(game.location, NOT_AVAILABLE);
    }

    #[test]
    fn result_container_without_label_is_tbd() {
        let html = page(&[
            r#"<div class="schedule-event-item"><div class="schedule-event-item-result"></div></div>"#,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.records[0].result_or_time, TO_BE_DETERMINED);
    }

    #[test]
    fn items_keep_document_order() {
        let html = page(&[STATS, PLAYED_IOWA, UPCOMING_PURDUE]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        let names: Vec<&str> = schedule
            .records
            .iter()
            .map(|r| r.opponent_name.as_str())
            .collect();
        assert_eq!(names, ["Iowa", "Purdue"]);
        assert_eq!(schedule.summary.most_recent_rank, "#2");
    }

    #[test]
    fn most_recent_rank_is_last_write() {
        let html = page(&[
            ranked_item("#4").as_str(),
            ranked_item("#1").as_str(),
            ranked_item("").as_str(),
            ranked_item("#3").as_str(),
            ranked_item("").as_str(),
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.records.len(), 5);
        assert_eq!(schedule.summary.most_recent_rank, "#3");
    }

    #[test]
    fn decodes_named_html5_entities() {
        let html = page(&[
            r#"<div class="schedule-event-item"><strong class="schedule-event-item-default__opponent-name">Saint Mary&rsquo;s</strong><div class="schedule-event-item-default__location">San Jos&eacute;, Calif.</div></div>"#,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.records[0].opponent_name, "Saint Mary\u{2019}s");
        assert_eq!(schedule.records[0].location, "San Jos\u{e9}, Calif.");
    }

    #[test]
    fn decodes_entities_in_names() {
        let html = page(&[
            r#"<div class="schedule-event-item"><strong class="schedule-event-item-default__opponent-name">Texas A&amp;M</strong></div>"#,
        ]);
        let schedule = parse_schedule(&html, &SIDEARM, &no_logos()).unwrap();
        assert_eq!(schedule.records[0].opponent_name, "Texas A&M");
    }
}
