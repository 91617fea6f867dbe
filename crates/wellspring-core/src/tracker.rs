//! Goal tracker: owns the session's goal collection.
//!
//! The tracker loads every goal once, applies user actions against the
//! latest in-memory copy in the order they arrive, and writes each changed
//! goal back through its [`GoalStore`]. Every mutation takes `&mut self`,
//! so two toggles on the same goal can never interleave.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::day::CalendarDay;
use crate::error::{CoreError, Result};
use crate::events::GoalEvent;
use crate::goal::{toggle_with_outcome, Goal, GoalDraft, GoalEdit, Transition};
use crate::storage::GoalStore;
use crate::summary::GoalSummary;

pub struct GoalTracker<S: GoalStore> {
    store: S,
    goals: Vec<Goal>,
    events: Vec<GoalEvent>,
}

impl<S: GoalStore> GoalTracker<S> {
    /// Load the collection from `store`.
    pub fn load(store: S) -> Result<Self> {
        let goals = store.load_goals()?;
        info!(count = goals.len(), "loaded goals");
        Ok(Self {
            store,
            goals,
            events: Vec::new(),
        })
    }

    /// Goals in creation order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::GoalNotFound(id.to_string()))
    }

    /// Create a goal from `draft` with a fresh id.
    pub fn create(&mut self, draft: GoalDraft, now: DateTime<Utc>) -> Result<Goal> {
        let goal = Goal::new(Uuid::new_v4().to_string(), draft, now)?;
        self.store.save_goal(&goal)?;
        self.goals.push(goal.clone());

        info!(goal_id = %goal.id, title = %goal.title, "goal created");
        self.events.push(GoalEvent::GoalCreated {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            at: now,
        });
        Ok(goal)
    }

    /// Toggle "done for today" on a goal and persist the result.
    ///
    /// A done mark left over from an earlier day is cleared first, so the
    /// first toggle of a new day always records a completion. When the engine
    /// reports no change, nothing is written.
    pub fn toggle(&mut self, id: &str, today: CalendarDay) -> Result<(Goal, Transition)> {
        let idx = self.position(id)?;
        let mut current = self.goals[idx].clone();
        current.roll_over(today);
        let (next, transition) = toggle_with_outcome(&current, today);

        let event = match transition {
            Transition::AlreadyDoneToday => return Ok((next, transition)),
            Transition::Undone => GoalEvent::GoalUncompleted {
                goal_id: next.id.clone(),
                streak: next.streak,
            },
            Transition::Continued { .. } => GoalEvent::GoalCompleted {
                goal_id: next.id.clone(),
                day: today,
                streak: next.streak,
                reset_from: 0,
            },
            Transition::Started { previous } => GoalEvent::GoalCompleted {
                goal_id: next.id.clone(),
                day: today,
                streak: next.streak,
                reset_from: previous,
            },
        };

        self.store.save_goal(&next)?;
        self.goals[idx] = next.clone();

        info!(goal_id = %next.id, ?transition, streak = next.streak, "goal toggled");
        self.events.push(event);

        Ok((next, transition))
    }

    /// Clear every done mark from a day before `today` and persist the
    /// affected goals. Returns how many were cleared.
    pub fn roll_over(&mut self, today: CalendarDay) -> Result<usize> {
        let mut cleared = 0;
        for goal in &mut self.goals {
            if goal.roll_over(today) {
                self.store.save_goal(goal)?;
                cleared += 1;
            }
        }
        if cleared > 0 {
            debug!(cleared, %today, "cleared stale done marks");
        }
        Ok(cleared)
    }

    /// Change descriptive fields of a goal.
    pub fn edit(&mut self, id: &str, edit: GoalEdit) -> Result<Goal> {
        let idx = self.position(id)?;
        let mut updated = self.goals[idx].clone();
        updated.apply_edit(edit)?;

        self.store.save_goal(&updated)?;
        self.goals[idx] = updated.clone();

        info!(goal_id = %updated.id, "goal edited");
        self.events.push(GoalEvent::GoalEdited {
            goal_id: updated.id.clone(),
        });
        Ok(updated)
    }

    /// Remove a goal, returning its last state.
    pub fn delete(&mut self, id: &str) -> Result<Goal> {
        let idx = self.position(id)?;
        self.store.delete_goal(id)?;
        let removed = self.goals.remove(idx);

        info!(goal_id = %removed.id, streak = removed.streak, "goal deleted");
        self.events.push(GoalEvent::GoalDeleted {
            goal_id: removed.id.clone(),
            final_streak: removed.streak,
        });
        Ok(removed)
    }

    /// Goals in one category (case-insensitive).
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Goal> + 'a {
        self.goals
            .iter()
            .filter(move |g| g.category.eq_ignore_ascii_case(category))
    }

    pub fn summary(&self, today: CalendarDay) -> GoalSummary {
        GoalSummary::compute(&self.goals, today)
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GoalEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::storage::MemoryStore;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, d).unwrap()
    }

    fn tracker() -> GoalTracker<MemoryStore> {
        GoalTracker::load(MemoryStore::new()).unwrap()
    }

    #[test]
    fn create_persists_and_emits() {
        let mut t = tracker();
        let goal = t
            .create(GoalDraft::new("Pray", "spiritual"), Utc::now())
            .unwrap();

        assert_eq!(t.goals().len(), 1);
        assert_eq!(t.store().len(), 1);
        assert_eq!(goal.streak, 0);

        let events = t.drain_events();
        assert!(matches!(&events[..], [GoalEvent::GoalCreated { .. }]));
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn create_rejects_invalid_draft() {
        let mut t = tracker();
        let err = t.create(GoalDraft::new("", "health"), Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyField(_))
        ));
        assert!(t.goals().is_empty());
        assert!(t.store().is_empty());
    }

    #[test]
    fn toggle_updates_collection_and_store() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;
        t.drain_events();

        let (goal, transition) = t.toggle(&id, day(2024, 1, 15)).unwrap();
        assert_eq!(transition, Transition::Started { previous: 0 });
        assert_eq!(goal.streak, 1);
        assert_eq!(t.get(&id).unwrap(), &goal);
        assert_eq!(t.store().load_goals().unwrap()[0], goal);

        let events = t.drain_events();
        assert_eq!(
            events,
            vec![GoalEvent::GoalCompleted {
                goal_id: id.clone(),
                day: day(2024, 1, 15),
                streak: 1,
                reset_from: 0,
            }]
        );
    }

    #[test]
    fn rapid_double_toggle_applies_in_order() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;
        let today = day(2024, 1, 15);

        t.toggle(&id, today).unwrap();
        let (goal, transition) = t.toggle(&id, today).unwrap();
        assert_eq!(transition, Transition::Undone);
        assert!(!goal.completed);
        assert_eq!(goal.streak, 1);

        let (goal, transition) = t.toggle(&id, today).unwrap();
        assert_eq!(transition, Transition::AlreadyDoneToday);
        assert_eq!(goal.streak, 1);
    }

    #[test]
    fn unchanged_toggle_emits_nothing() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;
        let today = day(2024, 1, 15);
        t.toggle(&id, today).unwrap();
        t.toggle(&id, today).unwrap();
        t.drain_events();

        t.toggle(&id, today).unwrap();
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn week_of_daily_completions() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;

        let mut today = day(2024, 1, 1);
        let (_, first) = t.toggle(&id, today).unwrap();
        assert_eq!(first, Transition::Started { previous: 0 });
        for n in 1..7 {
            today = today.succ();
            let (goal, transition) = t.toggle(&id, today).unwrap();
            assert_eq!(transition, Transition::Continued { from: n, to: n + 1 });
            assert!(goal.is_done_on(today));
        }
        assert_eq!(t.get(&id).unwrap().streak, 7);

        // skip a day
        let (goal, transition) = t.toggle(&id, today.succ().succ()).unwrap();
        assert_eq!(transition, Transition::Started { previous: 7 });
        assert_eq!(goal.streak, 1);
    }

    #[test]
    fn first_toggle_of_a_new_day_completes() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;
        t.toggle(&id, day(2024, 1, 14)).unwrap();
        t.drain_events();

        // yesterday's mark is still set; a single toggle today continues the chain
        let (goal, transition) = t.toggle(&id, day(2024, 1, 15)).unwrap();
        assert_eq!(transition, Transition::Continued { from: 1, to: 2 });
        assert!(goal.completed);
        assert!(matches!(
            &t.drain_events()[..],
            [GoalEvent::GoalCompleted { streak: 2, .. }]
        ));
    }

    #[test]
    fn roll_over_clears_and_persists_stale_marks() {
        let mut t = tracker();
        let walk = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;
        let pray = t.create(GoalDraft::new("Pray", "spiritual"), Utc::now()).unwrap().id;
        t.toggle(&walk, day(2024, 1, 14)).unwrap();
        t.toggle(&pray, day(2024, 1, 15)).unwrap();

        assert_eq!(t.roll_over(day(2024, 1, 15)).unwrap(), 1);
        assert!(!t.get(&walk).unwrap().completed);
        assert_eq!(t.get(&walk).unwrap().streak, 1);
        assert!(t.get(&pray).unwrap().completed);

        let stored = t.store().load_goals().unwrap();
        assert!(stored.iter().all(|g| g.completed == (g.id == pray)));

        assert_eq!(t.roll_over(day(2024, 1, 15)).unwrap(), 0);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut t = tracker();
        assert!(matches!(
            t.toggle("missing", day(2024, 1, 15)),
            Err(CoreError::GoalNotFound(_))
        ));
        assert!(matches!(t.delete("missing"), Err(CoreError::GoalNotFound(_))));
        assert!(matches!(
            t.edit("missing", GoalEdit::default()),
            Err(CoreError::GoalNotFound(_))
        ));
    }

    #[test]
    fn edit_and_delete() {
        let mut t = tracker();
        let id = t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap().id;

        let edited = t
            .edit(
                &id,
                GoalEdit {
                    title: Some("Run".into()),
                    ..GoalEdit::default()
                },
            )
            .unwrap();
        assert_eq!(edited.title, "Run");
        assert_eq!(t.store().load_goals().unwrap()[0].title, "Run");

        let removed = t.delete(&id).unwrap();
        assert_eq!(removed.title, "Run");
        assert!(t.goals().is_empty());
        assert!(t.store().is_empty());
    }

    #[test]
    fn category_filter_ignores_case() {
        let mut t = tracker();
        t.create(GoalDraft::new("Walk", "health"), Utc::now()).unwrap();
        t.create(GoalDraft::new("Pray", "spiritual"), Utc::now()).unwrap();
        assert_eq!(t.in_category("HEALTH").count(), 1);
    }
}
