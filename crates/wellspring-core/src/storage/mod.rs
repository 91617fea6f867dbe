mod config;
pub mod goal_db;
pub mod memory;
pub mod migrations;

pub use config::{CalendarConfig, Config, GoalDefaults, LoggingConfig};
pub use goal_db::GoalDb;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::Result;
use crate::goal::Goal;

/// Persistence backend for the goal collection.
///
/// The tracker loads everything once per session and writes back one goal
/// at a time after each mutation.
pub trait GoalStore {
    /// All stored goals, oldest first.
    fn load_goals(&self) -> Result<Vec<Goal>>;

    /// Insert or replace a goal by id.
    fn save_goal(&mut self, goal: &Goal) -> Result<()>;

    /// Remove a goal. Returns `false` if it did not exist.
    fn delete_goal(&mut self, id: &str) -> Result<bool>;
}

/// Returns the data directory.
///
/// `WELLSPRING_DATA_DIR` wins when set. Otherwise `~/.config/wellspring`, or
/// `~/.config/wellspring-dev` when `WELLSPRING_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("WELLSPRING_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("WELLSPRING_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("wellspring-dev")
            } else {
                base_dir.join("wellspring")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
