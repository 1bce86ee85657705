use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use fitplan::logging::init_logging;
use fitplan::{
    report, ActivityLog, AppConfig, ErrorSeverity, ExerciseUpdate, FitnessError, FitnessManager,
    LogFormat,
};

/// fitplan - Exercise library and training session planner
///
/// Keeps a library of exercises and a set of training sessions built from
/// them, persisted as a single JSON file.
#[derive(Parser)]
#[command(name = "fitplan")]
#[command(author = "fitplan Contributors")]
#[command(version)]
#[command(about = "Exercise library and training session planner", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Data file to read and write (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the exercise library
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommands,
    },

    /// Manage training sessions
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },

    /// List all exercises and training sessions
    List,
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Create a new exercise
    Create {
        /// Exercise name
        name: String,

        /// Target muscle group
        #[arg(short, long)]
        muscle: String,

        /// Weight in lbs (0 for bodyweight)
        #[arg(short, long, default_value_t = 0)]
        weight: u32,

        /// Repetitions per set
        #[arg(short, long)]
        reps: u32,
    },

    /// Modify an exercise; sessions holding it follow the change
    Edit {
        /// Current exercise name
        name: String,

        /// New exercise name
        #[arg(long = "name", value_name = "NAME")]
        new_name: Option<String>,

        /// New target muscle group
        #[arg(short, long)]
        muscle: Option<String>,

        /// New weight in lbs
        #[arg(short, long)]
        weight: Option<u32>,

        /// New repetitions per set
        #[arg(short, long)]
        reps: Option<u32>,
    },

    /// Show target muscle, weight, and reps for an exercise
    Show {
        /// Exercise name
        name: String,
    },

    /// Delete an exercise from the library and every session
    Delete {
        /// Exercise name
        name: String,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Create a new training session
    Create {
        /// Session name
        name: String,
    },

    /// Add an exercise to a session
    Add {
        /// Session name
        session: String,

        /// Exercise name
        exercise: String,

        /// Number of sets
        #[arg(short, long)]
        sets: u32,
    },

    /// Remove an exercise from a session
    Remove {
        /// Session name
        session: String,

        /// Exercise name
        exercise: String,
    },

    /// Remove all exercises from a session
    Clear {
        /// Session name
        session: String,
    },

    /// Rename a session
    Rename {
        /// Current session name
        session: String,

        /// New session name
        new_name: String,
    },

    /// Show the exercises and sets in a session
    Show {
        /// Session name
        session: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref());
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    init_logging(&config.logging)?;

    let store = config.data_store(cli.data.as_deref());
    let loaded = if config.storage.allow_missing_data_file {
        store.read_or_default()
    } else {
        store.read()
    };
    let mut manager = loaded
        .with_context(|| format!("Unable to read from file: {}", store.path().display()))?;

    let mut activity = ActivityLog::new();
    if let Err(e) = execute(cli.command, &mut manager, &mut activity) {
        report_failure(&e);
        if e.is_recoverable() {
            eprintln!("{}", format!("✗ {}", e.user_message()).red());
            std::process::exit(1);
        }
        return Err(e.into());
    }

    if !activity.is_empty() {
        store
            .write(&manager)
            .with_context(|| format!("Unable to write to file: {}", store.path().display()))?;

        println!("{}", "Activity:".dimmed());
        for event in &activity {
            println!("  {}", event.description.green());
        }
        println!(
            "{}",
            format!("✓ Saved to {}", store.path().display()).green().bold()
        );
    }

    Ok(())
}

/// Log a failed command at the level its severity calls for
fn report_failure(error: &FitnessError) {
    match error.severity() {
        ErrorSeverity::Warning => tracing::warn!(error = %error, "Command rejected"),
        ErrorSeverity::Error => tracing::error!(error = %error, "Command failed"),
    }
}

fn execute(
    command: Commands,
    manager: &mut FitnessManager,
    activity: &mut ActivityLog,
) -> Result<(), FitnessError> {
    match command {
        Commands::Exercise { action } => match action {
            ExerciseCommands::Create {
                name,
                muscle,
                weight,
                reps,
            } => {
                let exercise = manager.create_exercise(name, muscle, weight, reps, activity)?;
                println!("{} {}", "Created".green().bold(), exercise);
            }

            ExerciseCommands::Edit {
                name,
                new_name,
                muscle,
                weight,
                reps,
            } => {
                let update = ExerciseUpdate {
                    name: new_name,
                    target_muscle: muscle,
                    weight,
                    reps,
                };
                if update.is_empty() {
                    println!("{}", "Nothing to change.".yellow());
                    return Ok(());
                }
                let exercise = manager.update_exercise(&name, update, activity)?;
                println!("{} {}", "Updated".green().bold(), exercise);
            }

            ExerciseCommands::Show { name } => {
                let exercise = manager
                    .find_exercise_by_name(&name)
                    .ok_or_else(|| FitnessError::exercise_not_found(&name))?;
                println!("{}", report::exercise_table(std::slice::from_ref(exercise)));

                let sessions = manager.sessions_containing(&name)?;
                if !sessions.is_empty() {
                    println!("Used in: {}", sessions.join(", "));
                }
            }

            ExerciseCommands::Delete { name } => {
                let removed = manager.delete_exercise(&name, activity)?;
                println!("{} {}", "Deleted".red().bold(), removed);
            }
        },

        Commands::Session { action } => match action {
            SessionCommands::Create { name } => {
                let session = manager.create_session(name, activity);
                println!("{} {}", "Created session".green().bold(), session.name());
            }

            SessionCommands::Add {
                session,
                exercise,
                sets,
            } => {
                manager.add_exercise_to_session(&session, &exercise, sets, activity)?;
            }

            SessionCommands::Remove { session, exercise } => {
                let removed = manager.remove_exercise_from_session(&session, &exercise, activity)?;
                if !removed {
                    println!(
                        "{}",
                        format!("{} is not part of {}.", exercise.trim(), session.trim()).yellow()
                    );
                }
            }

            SessionCommands::Clear { session } => {
                manager.clear_session(&session, activity)?;
            }

            SessionCommands::Rename { session, new_name } => {
                manager.rename_session(&session, new_name, activity)?;
            }

            SessionCommands::Show { session } => {
                let found = manager
                    .find_session_by_name(&session)
                    .ok_or_else(|| FitnessError::session_not_found(&session))?;
                println!("{}", format!("Exercises in {}:", found.name()).cyan().bold());
                if found.is_empty() {
                    println!("{}", "(No exercises yet)".dimmed());
                } else {
                    println!("{}", report::session_table(found));
                }
            }
        },

        Commands::List => {
            println!("{}", "Exercises".cyan().bold());
            println!("{}", report::exercise_table(manager.exercises()));
            println!();
            println!("{}", "Training Sessions".cyan().bold());
            println!("{}", report::session_overview_table(manager));
        }
    }

    Ok(())
}
