/// CSS selectors for every piece of the schedule page we read.
///
/// Item-level selectors are relative to one schedule item; the parser scopes
/// them with [`Markup::in_item`].
#[derive(Debug, Clone)]
pub struct Markup {
    pub stats_section: &'static str,
    /// Any label inside the stats section ("Overall", "Conf.").
    pub stats_label: &'static str,
    /// The value following a label; looked up document-wide.
    pub stats_value: &'static str,
    pub stats_value_class: &'static str,

    pub item: &'static str,
    pub venue: &'static str,
    pub date_wrapper: &'static str,
    pub day: &'static str,
    pub date_label: &'static str,
    pub played_result: &'static str,
    pub outcome_token: &'static str,
    pub result_container: &'static str,
    pub pending_time: &'static str,
    pub rank: &'static str,
    pub opponent_name: &'static str,
    pub location: &'static str,
}

/// Sidearm-style schedule pages (huskers.com and friends).
pub const SIDEARM: Markup = Markup {
    stats_section: "section.schedule-stats",
    stats_label: "strong",
    stats_value: "strong.schedule-stats-item__value",
    stats_value_class: "schedule-stats-item__value",

    item: "div.schedule-event-item",
    venue: "div.schedule-event-venue__type",
    date_wrapper: "div.schedule-event-date__wrapper",
    day: "time",
    date_label: "time.schedule-event-date__label",
    played_result: "div.schedule-event-item-result__label",
    outcome_token: "span",
    result_container: "div.schedule-event-item-result",
    pending_time: "strong.schedule-event-item-result__label",
    rank: "strong.schedule-event-item-default__team-rank",
    opponent_name: "strong.schedule-event-item-default__opponent-name",
    location: "div.schedule-event-item-default__location",
};

impl Markup {
    pub fn in_item(&self, parts: &[&str]) -> String {
        let mut selector = self.item.to_string();
        for part in parts {
            selector.push(' ');
            selector.push_str(part);
        }
        selector
    }

    pub fn in_stats(&self, part: &str) -> String {
        format!("{} {}", self.stats_section, part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_selectors() {
        assert_eq!(
            SIDEARM.in_item(&[SIDEARM.date_wrapper, SIDEARM.day]),
            "div.schedule-event-item div.schedule-event-date__wrapper time"
        );
        assert_eq!(SIDEARM.in_stats(SIDEARM.stats_label), "section.schedule-stats strong");
    }
}
