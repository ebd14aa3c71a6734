//! habit - command-line habit tracker
//!
//! Wires together:
//! - Configuration loading
//! - Store initialization
//! - The habit engine
//!
//! Each invocation restores the persisted session, runs one command and
//! exits.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habit_api::{
    Frequency, Habit, HabitDraft, HabitPatch, NotificationSettings, SortBy, ViewPeriod,
};
use habit_config::load_config_or_default;
use habit_core::{HabitEngine, ToggleOutcome};
use habit_store::{SqliteStore, Store};
use habit_util::{default_config_path, format_date, HabitId, WallClock};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// habit - Track daily, weekly and monthly habits
#[derive(Parser, Debug)]
#[command(name = "habit")]
#[command(about = "Track habits and streaks from the terminal", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/habit/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set HABIT_DATA_DIR env var)
    #[arg(short, long, env = "HABIT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Log in with any email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Add a habit
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Edit fields of a habit
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    Archive {
        id: String,
    },
    Unarchive {
        id: String,
    },
    /// Delete a habit and all of its completions
    Delete {
        id: String,
    },
    /// Mark a habit done for a day, or undo it
    Toggle {
        id: String,
        /// Day to toggle (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List active habits
    List {
        #[arg(long)]
        sort: Option<SortBy>,
        #[arg(long)]
        period: Option<ViewPeriod>,
    },
    /// Show the current streak of a habit
    Streak {
        id: String,
    },
    /// Show aggregate statistics
    Stats,
    /// Show or change reminder settings
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
}

#[derive(Subcommand, Debug)]
enum NotificationsAction {
    Show,
    Set {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        time: Option<WallClock>,
        /// Weekdays, 0 = Sunday
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },
}

fn open_engine(args: &Args) -> Result<HabitEngine> {
    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.app.data_dir.clone());

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = habit_util::db_path(&data_dir);
    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );
    debug!(db_path = %db_path.display(), "Store initialized");

    Ok(HabitEngine::new(&settings, store))
}

fn require_login(engine: &HabitEngine) -> Result<()> {
    if !engine.is_logged_in() {
        bail!("Not logged in. Run `habit login` or `habit signup` first.");
    }
    Ok(())
}

fn print_habit_line(engine: &HabitEngine, habit: &Habit) {
    let today = engine.today();
    let mark = if engine.is_completed_on(&habit.id, today) {
        "x"
    } else {
        " "
    };
    println!(
        "[{}] {}  {:<24} {:<8} {} streak {:>3}  {} in {}",
        mark,
        habit.id,
        habit.name,
        habit.frequency,
        habit.color,
        engine.habit_streak(&habit.id),
        engine.completions_in_view(&habit.id),
        engine.view_period().as_str(),
    );
}

fn print_notifications(settings: &NotificationSettings) {
    let days: Vec<String> = settings.days.iter().map(|d| d.to_string()).collect();
    println!("enabled: {}", settings.enabled);
    println!("time:    {}", settings.time);
    println!("days:    {}", days.join(","));
}

async fn run(args: Args) -> Result<()> {
    let mut engine = open_engine(&args)?;

    match args.command {
        Command::Signup {
            email,
            password,
            name,
        } => {
            let user = engine.signup(&email, &password, &name).await;
            println!("Signed up as {} <{}>", user.name, user.email);
        }
        Command::Login { email, password } => {
            let user = engine.login(&email, &password).await;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            engine.logout();
            println!("Logged out");
        }
        Command::Whoami => match engine.user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
            None => println!("Not logged in"),
        },
        Command::Add {
            name,
            description,
            frequency,
            color,
            icon,
        } => {
            let mut draft = HabitDraft::new(name, frequency);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            if let Some(color) = color {
                draft = draft.with_color(color);
            }
            if let Some(icon) = icon {
                draft = draft.with_icon(icon);
            }
            let habit = engine.add_habit(draft)?;
            println!("Added {} ({})", habit.name, habit.id);
        }
        Command::Edit {
            id,
            name,
            description,
            clear_description,
            frequency,
            color,
            icon,
        } => {
            let patch = HabitPatch {
                name,
                description: if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                },
                frequency,
                color,
                icon,
                archived: None,
            };
            if patch.is_empty() {
                bail!("Nothing to change");
            }
            match engine.update_habit(&HabitId::new(id.as_str()), patch)? {
                Some(habit) => println!("Updated {} ({})", habit.name, habit.id),
                None => println!("No habit with id {}", id),
            }
        }
        Command::Archive { id } => match engine.archive_habit(&HabitId::new(id.as_str()))? {
            Some(habit) => println!("Archived {}", habit.name),
            None => println!("No habit with id {}", id),
        },
        Command::Unarchive { id } => match engine.unarchive_habit(&HabitId::new(id.as_str()))? {
            Some(habit) => println!("Unarchived {}", habit.name),
            None => println!("No habit with id {}", id),
        },
        Command::Delete { id } => {
            require_login(&engine)?;
            if engine.delete_habit(&HabitId::new(id.as_str()))? {
                println!("Deleted {}", id);
            } else {
                println!("No habit with id {}", id);
            }
        }
        Command::Toggle { id, date } => {
            let date = date.unwrap_or_else(|| engine.today());
            let habit_id = HabitId::new(id.as_str());
            match engine.toggle_habit_completion(&habit_id, date)? {
                ToggleOutcome::Completed(_) => {
                    println!("Completed {} on {}", id, format_date(date))
                }
                ToggleOutcome::Uncompleted(_) => {
                    println!("Uncompleted {} on {}", id, format_date(date))
                }
            }
            println!("Streak: {}", engine.habit_streak(&habit_id));
        }
        Command::List { sort, period } => {
            require_login(&engine)?;
            if let Some(sort) = sort {
                engine.set_sort_by(sort);
            }
            if let Some(period) = period {
                engine.set_view_period(period);
            }
            let habits = engine.sorted_habits();
            if habits.is_empty() {
                println!("No habits yet. Add one with `habit add --name ...`");
            }
            for habit in habits {
                print_habit_line(&engine, habit);
            }
        }
        Command::Streak { id } => {
            require_login(&engine)?;
            let habit_id = HabitId::new(id.as_str());
            if engine.habit(&habit_id).is_none() {
                bail!("No habit with id {}", id);
            }
            println!("{}", engine.habit_streak(&habit_id));
        }
        Command::Stats => {
            require_login(&engine)?;
            let stats = engine.stats();
            println!("Completed today:    {}", stats.today_completions);
            println!("Active habits:      {}", stats.total_active_habits);
            println!("Completion rate:    {}%", stats.completion_rate);
            println!("Longest streak:     {}", stats.longest_streak);
            println!("Total completions:  {}", stats.total_completions);
            println!("Last seven days:");
            for day in &stats.last_seven_days {
                println!("  {}  {}", format_date(day.date), day.completions);
            }
            if !stats.top_habits.is_empty() {
                println!("Top habits:");
                for top in &stats.top_habits {
                    println!(
                        "  {:<24} {:>4} completions, streak {}",
                        top.name, top.completions, top.streak
                    );
                }
            }
        }
        Command::Notifications { action } => match action {
            NotificationsAction::Show => print_notifications(&engine.notification_settings()),
            NotificationsAction::Set {
                enabled,
                time,
                days,
            } => {
                let mut settings = engine.notification_settings();
                if let Some(enabled) = enabled {
                    settings.enabled = enabled;
                }
                if let Some(time) = time {
                    settings.time = time;
                }
                if let Some(days) = days {
                    settings.days = days;
                }
                let saved = engine.set_notification_settings(settings)?;
                print_notifications(&saved);
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "habit starting");

    run(args).await
}
