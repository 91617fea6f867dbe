//! Goal commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use wellspring_core::goal::suggest::suggestions_for;
use wellspring_core::{
    CalendarDay, Config, Frequency, GoalDb, GoalDraft, GoalEdit, GoalTracker, TimePeriod,
    Transition,
};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a new goal
    Create {
        /// Goal title
        title: String,
        /// Goal description
        #[arg(long)]
        description: Option<String>,
        /// Category label (spiritual, health, service, personal, or any other)
        #[arg(long)]
        category: Option<String>,
        /// daily, weekly, monthly or custom
        #[arg(long)]
        frequency: Option<Frequency>,
        /// morning, afternoon, evening or anytime
        #[arg(long)]
        time_period: Option<TimePeriod>,
    },
    /// List goals
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Print JSON instead of one line per goal
        #[arg(long)]
        json: bool,
    },
    /// Show goal details
    Show {
        /// Goal ID
        id: String,
    },
    /// Edit a goal's descriptive fields
    Edit {
        /// Goal ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        time_period: Option<TimePeriod>,
    },
    /// Mark a goal done (or undone) for today
    Toggle {
        /// Goal ID
        id: String,
        /// Day to record, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<CalendarDay>,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
    /// Streak overview for a day
    Summary {
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<CalendarDay>,
    },
    /// Suggest goals for a category
    Suggest {
        #[arg(long)]
        category: Option<String>,
    },
}

fn resolve_day(
    date: Option<CalendarDay>,
    config: &Config,
) -> Result<CalendarDay, Box<dyn std::error::Error>> {
    match date {
        Some(day) => Ok(day),
        None => Ok(CalendarDay::today(config.day_boundary()?)),
    }
}

fn open_tracker() -> Result<GoalTracker<GoalDb>, Box<dyn std::error::Error>> {
    Ok(GoalTracker::load(GoalDb::open()?)?)
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        GoalAction::Create {
            title,
            description,
            category,
            frequency,
            time_period,
        } => {
            let draft = GoalDraft::new(
                title,
                category.unwrap_or_else(|| config.goals.default_category.clone()),
            )
            .with_description(description.unwrap_or_default())
            .with_frequency(frequency.unwrap_or(config.goals.default_frequency))
            .with_time_period(time_period.unwrap_or(config.goals.default_time_period));

            let goal = open_tracker()?.create(draft, Utc::now())?;
            println!("Goal created: {}", goal.id);
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::List { category, json } => {
            let today = resolve_day(None, &config)?;
            let mut tracker = open_tracker()?;
            tracker.roll_over(today)?;
            let goals: Vec<_> = match category {
                Some(ref c) => tracker.in_category(c).cloned().collect(),
                None => tracker.goals().to_vec(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
            } else if goals.is_empty() {
                println!("No goals.");
            } else {
                for goal in &goals {
                    println!(
                        "{} [{}] {} ({}, {}) streak={}{}",
                        goal.id,
                        if goal.is_done_on(today) { "x" } else { " " },
                        goal.title,
                        goal.category,
                        goal.frequency,
                        goal.streak,
                        goal.last_completed
                            .map(|d| format!(" last={d}"))
                            .unwrap_or_default(),
                    );
                }
            }
        }
        GoalAction::Show { id } => {
            let mut tracker = open_tracker()?;
            tracker.roll_over(resolve_day(None, &config)?)?;
            let goal = tracker.get(&id).ok_or(format!("Goal not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(goal)?);
        }
        GoalAction::Edit {
            id,
            title,
            description,
            category,
            frequency,
            time_period,
        } => {
            let edit = GoalEdit {
                title,
                description,
                category,
                frequency,
                time_period,
            };
            if edit.is_empty() {
                return Err("nothing to change".into());
            }
            let goal = open_tracker()?.edit(&id, edit)?;
            println!("Goal updated:");
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::Toggle { id, date } => {
            let today = resolve_day(date, &config)?;
            let (goal, transition) = open_tracker()?.toggle(&id, today)?;
            match transition {
                Transition::Undone => {
                    println!("Marked not done. Streak stays at {}.", goal.streak)
                }
                Transition::AlreadyDoneToday => {
                    println!("Already recorded for {today}. Streak: {}.", goal.streak)
                }
                Transition::Continued { to, .. } => println!("Done! Streak: {to} days."),
                Transition::Started { previous } if previous > 0 => {
                    println!("Done! New streak started (previous: {previous}).")
                }
                Transition::Started { .. } => println!("Done! Streak: 1 day."),
            }
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::Delete { id } => {
            open_tracker()?.delete(&id)?;
            println!("Goal deleted: {id}");
        }
        GoalAction::Summary { date } => {
            let today = resolve_day(date, &config)?;
            let summary = open_tracker()?.summary(today);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        GoalAction::Suggest { category } => {
            let category = category.unwrap_or_else(|| config.goals.default_category.clone());
            println!("{}", serde_json::to_string_pretty(&suggestions_for(&category))?);
        }
    }
    Ok(())
}
