//! Per-day roll-up of the goal collection.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::day::CalendarDay;
use crate::goal::Goal;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalSummary {
    pub day: CalendarDay,
    pub total: usize,
    pub completed_today: usize,
    /// Goals whose chain is still alive (completed today or yesterday).
    pub active_streaks: usize,
    pub longest_streak: u32,
    pub by_category: BTreeMap<String, usize>,
}

impl GoalSummary {
    pub fn compute<'a>(goals: impl IntoIterator<Item = &'a Goal>, today: CalendarDay) -> Self {
        let mut summary = GoalSummary {
            day: today,
            total: 0,
            completed_today: 0,
            active_streaks: 0,
            longest_streak: 0,
            by_category: BTreeMap::new(),
        };

        for goal in goals {
            summary.total += 1;
            *summary.by_category.entry(goal.category.clone()).or_default() += 1;

            if goal.is_done_on(today) {
                summary.completed_today += 1;
            }

            let alive = goal
                .last_completed
                .is_some_and(|last| last == today || last.is_yesterday_of(today));
            if alive && goal.streak > 0 {
                summary.active_streaks += 1;
                summary.longest_streak = summary.longest_streak.max(goal.streak);
            }
        }

        summary
    }
}
