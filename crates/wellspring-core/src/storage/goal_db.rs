//! SQLite-based storage for goals.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use super::{data_dir, migrations, GoalStore};
use crate::day::CalendarDay;
use crate::error::{DatabaseError, Result};
use crate::goal::{Frequency, Goal, TimePeriod};

const GOAL_COLUMNS: &str = "id, title, description, category, frequency, time_period,
                            completed, streak, last_completed, created_at";

/// Parse datetime from RFC3339 string with fallback to the Unix epoch
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            warn!(value = dt_str, error = %e, "unparseable created_at");
            DateTime::<Utc>::default()
        })
}

/// Parse a stored day; unparseable values are treated as "never completed".
fn parse_day(day_str: Option<String>) -> Option<CalendarDay> {
    let day_str = day_str?;
    match day_str.parse() {
        Ok(day) => Some(day),
        Err(e) => {
            warn!(value = %day_str, error = %e, "unparseable last_completed");
            None
        }
    }
}

/// Parse a stored enum column, falling back to its default.
fn parse_or_default<T>(column: &str, value: &str) -> T
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        warn!(column, value, error = %e, "unparseable value, using default");
        T::default()
    })
}

/// Build a Goal from a database row
fn row_to_goal(row: &rusqlite::Row) -> Result<Goal, rusqlite::Error> {
    let frequency: String = row.get(4)?;
    let time_period: String = row.get(5)?;
    let created_at: String = row.get(9)?;

    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        frequency: parse_or_default::<Frequency>("frequency", &frequency),
        time_period: parse_or_default::<TimePeriod>("time_period", &time_period),
        completed: row.get(6)?,
        streak: row.get(7)?,
        last_completed: parse_day(row.get(8)?),
        created_at: parse_datetime_fallback(&created_at),
    })
}

/// SQLite database for goal storage.
pub struct GoalDb {
    conn: Connection,
}

impl GoalDb {
    /// Open the goal database at `~/.config/wellspring/wellspring.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("wellspring.db"))
    }

    /// Open (or create) a database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        debug!(path = %path.display(), "opened goal database");
        Ok(db)
    }

    /// Open an in-memory database (for tests and ephemeral sessions).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Insert or replace a goal.
    pub fn upsert_goal(&self, goal: &Goal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goals (
                id, title, description, category, frequency, time_period,
                completed, streak, last_completed, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                category = excluded.category,
                frequency = excluded.frequency,
                time_period = excluded.time_period,
                completed = excluded.completed,
                streak = excluded.streak,
                last_completed = excluded.last_completed",
            params![
                goal.id,
                goal.title,
                goal.description,
                goal.category,
                goal.frequency.as_str(),
                goal.time_period.as_str(),
                goal.completed,
                goal.streak,
                goal.last_completed.map(|d| d.to_string()),
                goal.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        Ok(())
    }

    /// Get a goal by ID.
    pub fn get_goal(&self, id: &str) -> Result<Option<Goal>> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1");
        let goal = self
            .conn
            .query_row(&sql, params![id], row_to_goal)
            .optional()?;
        Ok(goal)
    }

    /// List all goals, oldest first.
    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY created_at, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let goals = stmt
            .query_map([], row_to_goal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    /// Delete a goal. Returns whether a row was removed.
    pub fn remove_goal(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

impl GoalStore for GoalDb {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        self.list_goals()
    }

    fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.upsert_goal(goal)
    }

    fn delete_goal(&mut self, id: &str) -> Result<bool> {
        self.remove_goal(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{toggle_completion, GoalDraft};
    use chrono::TimeZone;

    fn make_test_goal(id: &str, title: &str) -> Goal {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        Goal::new(id, GoalDraft::new(title, "health"), created).unwrap()
    }

    #[test]
    fn create_and_get_goal() {
        let db = GoalDb::open_memory().unwrap();
        let goal = make_test_goal("g-1", "Walk");
        db.upsert_goal(&goal).unwrap();

        let retrieved = db.get_goal("g-1").unwrap().unwrap();
        assert_eq!(retrieved, goal);
    }

    #[test]
    fn missing_goal_is_none() {
        let db = GoalDb::open_memory().unwrap();
        assert!(db.get_goal("nope").unwrap().is_none());
    }

    #[test]
    fn completion_fields_round_trip() {
        let db = GoalDb::open_memory().unwrap();
        let goal = make_test_goal("g-1", "Walk");
        db.upsert_goal(&goal).unwrap();

        let today = CalendarDay::from_ymd(2024, 1, 15).unwrap();
        let done = toggle_completion(&goal, today);
        db.upsert_goal(&done).unwrap();

        let retrieved = db.get_goal("g-1").unwrap().unwrap();
        assert!(retrieved.completed);
        assert_eq!(retrieved.streak, 1);
        assert_eq!(retrieved.last_completed, Some(today));
    }

    #[test]
    fn upsert_keeps_created_at() {
        let db = GoalDb::open_memory().unwrap();
        let goal = make_test_goal("g-1", "Walk");
        db.upsert_goal(&goal).unwrap();

        let mut edited = goal.clone();
        edited.title = "Run".into();
        edited.created_at = Utc::now();
        db.upsert_goal(&edited).unwrap();

        let retrieved = db.get_goal("g-1").unwrap().unwrap();
        assert_eq!(retrieved.title, "Run");
        assert_eq!(retrieved.created_at, goal.created_at);
    }

    #[test]
    fn list_goals_in_creation_order() {
        let db = GoalDb::open_memory().unwrap();
        let mut second = make_test_goal("b", "Second");
        second.created_at = second.created_at + chrono::Duration::hours(1);
        db.upsert_goal(&second).unwrap();
        db.upsert_goal(&make_test_goal("a", "First")).unwrap();

        let titles: Vec<_> = db.list_goals().unwrap().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn delete_goal() {
        let mut db = GoalDb::open_memory().unwrap();
        db.save_goal(&make_test_goal("g-1", "Walk")).unwrap();

        assert!(db.delete_goal("g-1").unwrap());
        assert!(!db.delete_goal("g-1").unwrap());
        assert!(db.get_goal("g-1").unwrap().is_none());
    }

    #[test]
    fn corrupt_enum_columns_read_as_defaults() {
        let db = GoalDb::open_memory().unwrap();
        let mut goal = make_test_goal("g-1", "Walk");
        goal.frequency = Frequency::Weekly;
        goal.time_period = TimePeriod::Evening;
        db.upsert_goal(&goal).unwrap();
        db.conn
            .execute(
                "UPDATE goals SET frequency = 'hourly', time_period = 'noon' WHERE id = 'g-1'",
                [],
            )
            .unwrap();

        let retrieved = db.get_goal("g-1").unwrap().unwrap();
        assert_eq!(retrieved.frequency, Frequency::Daily);
        assert_eq!(retrieved.time_period, TimePeriod::Anytime);
    }

    #[test]
    fn corrupt_last_completed_reads_as_none() {
        let db = GoalDb::open_memory().unwrap();
        db.upsert_goal(&make_test_goal("g-1", "Walk")).unwrap();
        db.conn
            .execute("UPDATE goals SET last_completed = 'soon' WHERE id = 'g-1'", [])
            .unwrap();

        let retrieved = db.get_goal("g-1").unwrap().unwrap();
        assert_eq!(retrieved.last_completed, None);
    }
}
