//! Streak engine: what happens when the user toggles "done for today".
//!
//! The engine is a pure function of a goal and the current calendar day.
//! It never reads the clock or touches storage.
//!
//! ```text
//!                 mark complete
//!                 streak+1 if last == today-1, else 1
//!   Incomplete ─────────────────────────────────────> CompleteToday
//!       ^                                                  |
//!       +──────────────────────────────────────────────────+
//!                 mark incomplete (streak, last kept)
//! ```
//!
//! Completing again on a day that is already recorded as `last_completed` is
//! a no-op, so undo followed by redo on the same day never double counts.

use tracing::{debug, warn};

use super::Goal;
use crate::day::CalendarDay;

/// Decides whether a previous completion continues the chain into `today`.
pub trait StreakRule {
    fn continues(&self, last: CalendarDay, today: CalendarDay) -> bool;
}

/// One completion per calendar day, chain broken by any missed day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyRule;

impl StreakRule for DailyRule {
    fn continues(&self, last: CalendarDay, today: CalendarDay) -> bool {
        last.is_yesterday_of(today)
    }
}

/// What a toggle did to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Today's mark was removed; streak and last completion kept.
    Undone,
    /// Already recorded for today; goal returned unchanged.
    AlreadyDoneToday,
    /// Chain continued from yesterday.
    Continued { from: u32, to: u32 },
    /// New chain started at 1. `previous` is the streak that was dropped.
    Started { previous: u32 },
}

impl Transition {
    /// `true` when the returned goal differs from the input.
    pub fn changed(&self) -> bool {
        !matches!(self, Transition::AlreadyDoneToday)
    }
}

/// Toggle completion of `goal` for `today` under the daily rule.
pub fn toggle_completion(goal: &Goal, today: CalendarDay) -> Goal {
    toggle_with_outcome(goal, today).0
}

/// Same as [`toggle_completion`], also reporting which branch was taken.
pub fn toggle_with_outcome(goal: &Goal, today: CalendarDay) -> (Goal, Transition) {
    toggle_with_rule(goal, today, &DailyRule)
}

/// Toggle completion using a custom continuation rule.
pub fn toggle_with_rule<R: StreakRule + ?Sized>(
    goal: &Goal,
    today: CalendarDay,
    rule: &R,
) -> (Goal, Transition) {
    let mut next = goal.clone();

    if goal.completed {
        next.completed = false;
        debug!(goal_id = %goal.id, streak = goal.streak, "goal marked incomplete");
        return (next, Transition::Undone);
    }

    let transition = match goal.last_completed {
        Some(last) if last == today => {
            debug!(goal_id = %goal.id, %today, "already completed today");
            return (next, Transition::AlreadyDoneToday);
        }
        Some(last) if rule.continues(last, today) => Transition::Continued {
            from: goal.streak,
            to: goal.streak.saturating_add(1),
        },
        Some(last) => {
            if last > today {
                warn!(
                    goal_id = %goal.id,
                    %last,
                    %today,
                    "last completion is in the future; restarting streak"
                );
            }
            Transition::Started {
                previous: goal.streak,
            }
        }
        None => Transition::Started { previous: 0 },
    };

    next.streak = match transition {
        Transition::Continued { to, .. } => to,
        _ => 1,
    };
    next.completed = true;
    next.last_completed = Some(today);

    debug!(goal_id = %goal.id, streak = next.streak, %today, "goal marked complete");
    (next, transition)
}
