use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::CalendarDay;

/// Every change to the goal collection produces an Event.
/// Front ends drain them to refresh views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GoalEvent {
    GoalCreated {
        goal_id: String,
        title: String,
        at: DateTime<Utc>,
    },
    GoalCompleted {
        goal_id: String,
        day: CalendarDay,
        streak: u32,
        /// Streak dropped because the chain was broken (0 if none).
        reset_from: u32,
    },
    GoalUncompleted {
        goal_id: String,
        streak: u32,
    },
    GoalEdited {
        goal_id: String,
    },
    GoalDeleted {
        goal_id: String,
        final_streak: u32,
    },
}

impl GoalEvent {
    pub fn goal_id(&self) -> &str {
        match self {
            GoalEvent::GoalCreated { goal_id, .. }
            | GoalEvent::GoalCompleted { goal_id, .. }
            | GoalEvent::GoalUncompleted { goal_id, .. }
            | GoalEvent::GoalEdited { goal_id }
            | GoalEvent::GoalDeleted { goal_id, .. } => goal_id,
        }
    }
}
