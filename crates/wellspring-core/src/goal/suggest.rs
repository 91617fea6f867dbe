//! Canned goal suggestions per category.
//!
//! This is the local fallback used when no writing assistant is available:
//! a fixed template table, no network access.

use serde::Serialize;

use super::{Frequency, GoalDraft, TimePeriod};

/// A ready-made goal idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub frequency: Frequency,
    pub time_period: TimePeriod,
}

impl Suggestion {
    const fn new(
        title: &'static str,
        description: &'static str,
        category: &'static str,
        frequency: Frequency,
        time_period: TimePeriod,
    ) -> Self {
        Self {
            title,
            description,
            category,
            frequency,
            time_period,
        }
    }

    /// Turn the suggestion into a creation draft.
    pub fn to_draft(&self) -> GoalDraft {
        GoalDraft::new(self.title, self.category)
            .with_description(self.description)
            .with_frequency(self.frequency)
            .with_time_period(self.time_period)
    }
}

const SPIRITUAL: &[Suggestion] = &[
    Suggestion::new(
        "Morning scripture reading",
        "Read one chapter before starting the day",
        "spiritual",
        Frequency::Daily,
        TimePeriod::Morning,
    ),
    Suggestion::new(
        "Evening reflection",
        "Write three lines about where you noticed grace today",
        "spiritual",
        Frequency::Daily,
        TimePeriod::Evening,
    ),
    Suggestion::new(
        "Quiet prayer",
        "Ten minutes of silence and prayer",
        "spiritual",
        Frequency::Daily,
        TimePeriod::Anytime,
    ),
];

const HEALTH: &[Suggestion] = &[
    Suggestion::new(
        "Walk outside",
        "Twenty minutes of walking, no phone",
        "health",
        Frequency::Daily,
        TimePeriod::Afternoon,
    ),
    Suggestion::new(
        "Drink water first",
        "A full glass of water before coffee",
        "health",
        Frequency::Daily,
        TimePeriod::Morning,
    ),
    Suggestion::new(
        "Lights out on time",
        "In bed by the same hour every night",
        "health",
        Frequency::Daily,
        TimePeriod::Evening,
    ),
];

const SERVICE: &[Suggestion] = &[
    Suggestion::new(
        "Reach out to someone",
        "Send an encouraging message to a friend or neighbour",
        "service",
        Frequency::Daily,
        TimePeriod::Anytime,
    ),
    Suggestion::new(
        "Volunteer",
        "Give an hour to a local cause",
        "service",
        Frequency::Weekly,
        TimePeriod::Anytime,
    ),
];

const PERSONAL: &[Suggestion] = &[
    Suggestion::new(
        "Journal",
        "Write one page, unedited",
        "personal",
        Frequency::Daily,
        TimePeriod::Evening,
    ),
    Suggestion::new(
        "Read a book",
        "Fifteen minutes of reading for enjoyment",
        "personal",
        Frequency::Daily,
        TimePeriod::Anytime,
    ),
];

/// Suggestions for `category`; an unknown category gets the first idea of
/// every well-known category.
pub fn suggestions_for(category: &str) -> Vec<Suggestion> {
    match category.trim().to_lowercase().as_str() {
        "spiritual" => SPIRITUAL.to_vec(),
        "health" => HEALTH.to_vec(),
        "service" => SERVICE.to_vec(),
        "personal" => PERSONAL.to_vec(),
        _ => vec![SPIRITUAL[0], HEALTH[0], SERVICE[0], PERSONAL[0]],
    }
}

/// Every suggestion across the well-known categories.
pub fn all_suggestions() -> Vec<Suggestion> {
    [SPIRITUAL, HEALTH, SERVICE, PERSONAL].concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::KNOWN_CATEGORIES;

    #[test]
    fn each_known_category_has_suggestions() {
        for category in KNOWN_CATEGORIES {
            let list = suggestions_for(category);
            assert!(!list.is_empty(), "no suggestions for {category}");
            assert!(list.iter().all(|s| s.category == *category));
        }
    }

    #[test]
    fn unknown_category_gets_one_of_each() {
        let list = suggestions_for("finance");
        assert_eq!(list.len(), KNOWN_CATEGORIES.len());
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(suggestions_for("Health"), suggestions_for("health"));
    }

    #[test]
    fn drafts_validate() {
        for s in all_suggestions() {
            assert!(s.to_draft().validated().is_ok(), "{} failed validation", s.title);
        }
    }
}
