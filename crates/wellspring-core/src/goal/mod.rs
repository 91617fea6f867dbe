//! Goal types: the tracked habit, its creation draft and edit patch.
//!
//! A goal is only ever mutated through [`streak::toggle_completion`] (for
//! completion state) or [`Goal::apply_edit`] (for descriptive fields).

pub mod streak;
pub mod suggest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::day::CalendarDay;
use crate::error::ValidationError;

pub use streak::{toggle_completion, toggle_with_outcome, DailyRule, StreakRule, Transition};

/// Well-known category labels. Categories are open strings; these are the
/// ones the suggestion templates and the CLI help know about.
pub const KNOWN_CATEGORIES: &[&str] = &["spiritual", "health", "service", "personal"];

/// How often a goal is meant to be done.
///
/// Informational only: streaks are counted per calendar day for every
/// frequency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Custom => "custom",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "custom" => Ok(Frequency::Custom),
            other => Err(ValidationError::invalid(
                "frequency",
                format!("'{other}' is not one of daily, weekly, monthly, custom"),
            )),
        }
    }
}

/// Preferred part of the day. Not used by the streak logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Anytime,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Anytime => "anytime",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePeriod::Morning),
            "afternoon" => Ok(TimePeriod::Afternoon),
            "evening" => Ok(TimePeriod::Evening),
            "anytime" => Ok(TimePeriod::Anytime),
            other => Err(ValidationError::invalid(
                "time_period",
                format!("'{other}' is not one of morning, afternoon, evening, anytime"),
            )),
        }
    }
}

/// A recurring habit or intention with a daily streak counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier, immutable
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Open label, see [`KNOWN_CATEGORIES`]
    pub category: String,
    pub frequency: Frequency,
    pub time_period: TimePeriod,
    /// Done for the current day
    pub completed: bool,
    /// Consecutive days completed
    pub streak: u32,
    /// Most recent day the goal was marked complete
    pub last_completed: Option<CalendarDay>,
    pub created_at: DateTime<Utc>,
}

/// Conceptual state of a goal as seen by the streak engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalState {
    Incomplete {
        streak: u32,
        last_completed: Option<CalendarDay>,
    },
    CompleteToday {
        streak: u32,
        day: CalendarDay,
    },
}

impl Goal {
    /// Build a fresh goal from a validated draft.
    pub fn new(
        id: impl Into<String>,
        draft: GoalDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let draft = draft.validated()?;
        Ok(Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            frequency: draft.frequency,
            time_period: draft.time_period,
            completed: false,
            streak: 0,
            last_completed: None,
            created_at,
        })
    }

    /// State-machine view of this goal.
    ///
    /// A goal flagged `completed` without a `last_completed` day violates the
    /// model and is reported as incomplete.
    pub fn state(&self) -> GoalState {
        match (self.completed, self.last_completed) {
            (true, Some(day)) => GoalState::CompleteToday {
                streak: self.streak,
                day,
            },
            _ => GoalState::Incomplete {
                streak: self.streak,
                last_completed: self.last_completed,
            },
        }
    }

    /// `true` when marked complete and the completion day is `today`.
    pub fn is_done_on(&self, today: CalendarDay) -> bool {
        self.completed && self.last_completed == Some(today)
    }

    /// Clear a done mark carried over from an earlier day.
    ///
    /// `completed` only ever means "done on `today`", so a flag whose
    /// completion day is not `today` is stale. Returns `true` if it was.
    pub fn roll_over(&mut self, today: CalendarDay) -> bool {
        let stale = self.completed && self.last_completed != Some(today);
        if stale {
            self.completed = false;
        }
        stale
    }

    /// Apply descriptive changes. Completion fields are never touched here.
    /// Nothing is changed if any field fails validation.
    pub fn apply_edit(&mut self, edit: GoalEdit) -> Result<(), ValidationError> {
        let title = edit.title.as_deref().map(|t| non_empty("title", t)).transpose()?;
        let category = edit
            .category
            .as_deref()
            .map(normalize_category)
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description.trim().to_string();
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(frequency) = edit.frequency {
            self.frequency = frequency;
        }
        if let Some(time_period) = edit.time_period {
            self.time_period = time_period;
        }
        Ok(())
    }
}

/// User input for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub time_period: TimePeriod,
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            frequency: Frequency::default(),
            time_period: TimePeriod::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_time_period(mut self, time_period: TimePeriod) -> Self {
        self.time_period = time_period;
        self
    }

    /// Trim and check the free-text fields.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: non_empty("title", &self.title)?,
            description: self.description.trim().to_string(),
            category: normalize_category(&self.category)?,
            frequency: self.frequency,
            time_period: self.time_period,
        })
    }
}

/// Partial update for a goal's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub time_period: Option<TimePeriod>,
}

impl GoalEdit {
    pub fn is_empty(&self) -> bool {
        self == &GoalEdit::default()
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_category(category: &str) -> Result<String, ValidationError> {
    non_empty("category", category).map(|c| c.to_lowercase())
}
