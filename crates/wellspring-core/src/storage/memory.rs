//! In-memory goal store, used for tests and throwaway sessions.

use super::GoalStore;
use crate::error::Result;
use crate::goal::Goal;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    goals: Vec<Goal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing goals.
    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl GoalStore for MemoryStore {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.clone())
    }

    fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        match self.goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal.clone(),
            None => self.goals.push(goal.clone()),
        }
        Ok(())
    }

    fn delete_goal(&mut self, id: &str) -> Result<bool> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        Ok(self.goals.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalDraft;
    use chrono::Utc;

    #[test]
    fn save_replaces_by_id() {
        let mut store = MemoryStore::new();
        let mut goal = Goal::new("g-1", GoalDraft::new("Walk", "health"), Utc::now()).unwrap();
        store.save_goal(&goal).unwrap();

        goal.streak = 3;
        store.save_goal(&goal).unwrap();

        let loaded = store.load_goals().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].streak, 3);
    }

    #[test]
    fn delete_reports_presence() {
        let goal = Goal::new("g-1", GoalDraft::new("Walk", "health"), Utc::now()).unwrap();
        let mut store = MemoryStore::with_goals(vec![goal]);
        assert!(store.delete_goal("g-1").unwrap());
        assert!(!store.delete_goal("g-1").unwrap());
        assert!(store.is_empty());
    }
}
