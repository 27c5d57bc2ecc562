use chrono::{Datelike, Local, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use lift_core::*;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Monthly workout planner and set logbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the generated plan for a month (default)
    Plan {
        /// Month to plan, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        /// Work/rest day numbers, overriding the configured schedule
        #[arg(long = "work-day")]
        work_days: Vec<u32>,

        /// Also list each day's exercises
        #[arg(long)]
        full: bool,
    },

    /// Record weight, RPE, or completion for one set
    Log {
        /// Calendar date of the set, as YYYY-MM-DD
        date: NaiveDate,

        /// Exercise name exactly as shown in the plan
        exercise: String,

        /// 1-based set index
        set: u32,

        /// Weight in kg
        #[arg(long)]
        weight: Option<String>,

        /// Perceived exertion, 1-10
        #[arg(long)]
        rpe: Option<String>,

        /// Mark the set completed
        #[arg(long, conflicts_with = "undone")]
        done: bool,

        /// Clear the completion mark
        #[arg(long, conflicts_with = "done")]
        undone: bool,
    },

    /// Weekly best/RPE summary with next-load recommendations
    Summary {
        /// Month to summarize, as YYYY-MM (defaults to the month of the date)
        #[arg(long)]
        month: Option<String>,

        /// Treat this date as today, as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Export the month's log as CSV
    Export {
        /// Month to export, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        /// Output file (defaults to workout_log.csv in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the daily reminder text for an external scheduler
    Remind {
        /// Month the plan covers, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        /// Treat this date as today, as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    // Keep stdout clean for plan/export consumers; RUST_LOG re-enables detail
    lift_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let errors = build_catalog().validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Catalog("Invalid catalog".into()));
    }

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Plan {
            month,
            work_days,
            full,
        }) => cmd_plan(month, work_days, full, &config),
        Some(Commands::Log {
            date,
            exercise,
            set,
            weight,
            rpe,
            done,
            undone,
        }) => cmd_log(data_dir, date, exercise, set, weight, rpe, done, undone),
        Some(Commands::Summary { month, date }) => cmd_summary(data_dir, month, date, &config),
        Some(Commands::Export { month, output }) => cmd_export(data_dir, month, output, &config),
        Some(Commands::Remind { month, date }) => cmd_remind(month, date, &config),
        None => cmd_plan(None, Vec::new(), false, &config),
    }
}

/// Parse a YYYY-MM argument, falling back to the month containing `today`
fn resolve_month(arg: Option<&str>, today: NaiveDate) -> Result<PlanMonth> {
    match arg {
        Some(raw) => raw.parse(),
        None => PlanMonth::new(today.year(), today.month()),
    }
}

fn build_plan(month: PlanMonth, overrides: &[u32], config: &Config) -> WorkoutPlan {
    let work_days: BTreeSet<u32> = if overrides.is_empty() {
        config.schedule.work_days_for(month)
    } else {
        overrides.iter().copied().collect()
    };
    generate_monthly(month, &work_days)
}

fn cmd_plan(month: Option<String>, work_days: Vec<u32>, full: bool, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let month = resolve_month(month.as_deref(), today)?;
    let plan = build_plan(month, &work_days, config);

    display_plan(&plan, full);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    data_dir: PathBuf,
    date: NaiveDate,
    exercise: String,
    set: u32,
    weight: Option<String>,
    rpe: Option<String>,
    done: bool,
    undone: bool,
) -> Result<()> {
    if set == 0 {
        return Err(Error::Other("set index is 1-based".into()));
    }
    if weight.is_none() && rpe.is_none() && !done && !undone {
        return Err(Error::Other(
            "nothing to record: pass --weight, --rpe, --done, or --undone".into(),
        ));
    }

    let key = SetKey::new(date, exercise, set);
    let logbook_path = data_dir.join("logbook.json");

    Logbook::update(&logbook_path, |log| {
        if let Some(w) = weight {
            log.record_weight(&key, w);
        }
        if let Some(r) = rpe {
            log.record_rpe(&key, r);
        }
        if done {
            log.set_completed(&key, true);
        }
        if undone {
            log.set_completed(&key, false);
        }
        Ok(())
    })?;

    println!("✓ Logged {}", key);
    Ok(())
}

fn cmd_summary(
    data_dir: PathBuf,
    month: Option<String>,
    date: Option<NaiveDate>,
    config: &Config,
) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let month = resolve_month(month.as_deref(), today)?;
    let plan = build_plan(month, &[], config);
    let log = Logbook::load(&data_dir.join("logbook.json"))?;

    let rows = weekly_summary(&plan, &log, today);
    let week = today.week(Weekday::Mon);

    println!("\nThis Week ({} to {})", week.first_day(), week.last_day());
    if rows.is_empty() {
        println!("No data yet. Log some sets to see your summary.");
    }
    for row in &rows {
        let next = if row.next_kg > row.best_kg && row.next_kg > 0.0 {
            format!("{:.1} kg", row.next_kg)
        } else {
            "repeat".to_string()
        };
        println!("  {}", row.exercise);
        println!(
            "    Best: {:.1} kg | Avg RPE: {:.1} | Next: {}",
            row.best_kg, row.avg_rpe, next
        );
    }

    if let Some(day) = plan.day_on(today) {
        let hints = day_hints(day, &log);
        if !hints.is_empty() {
            println!("\nProgression tips");
            for hint in &hints {
                if hint.next_kg > hint.best_kg && hint.next_kg > 0.0 {
                    println!("  {}: Try ~{:.1} kg next time", hint.exercise, hint.next_kg);
                } else {
                    println!("  {}: Repeat best {:.1} kg", hint.exercise, hint.best_kg);
                }
            }
        }
    }

    Ok(())
}

fn cmd_export(
    data_dir: PathBuf,
    month: Option<String>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let today = Local::now().date_naive();
    let month = resolve_month(month.as_deref(), today)?;
    let plan = build_plan(month, &[], config);
    let log = Logbook::load(&data_dir.join("logbook.json"))?;

    let output = output.unwrap_or_else(|| data_dir.join("workout_log.csv"));
    write_csv(&output, &plan, &log)?;

    println!("✓ Exported {} set rows to {}", plan.total_sets(), output.display());
    Ok(())
}

fn cmd_remind(month: Option<String>, date: Option<NaiveDate>, config: &Config) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let month = resolve_month(month.as_deref(), today)?;
    let plan = build_plan(month, &[], config);

    println!("Workout reminder @ {}", config.reminder.time_label());
    println!("{}", today_summary(&plan, today));
    Ok(())
}

fn display_plan(plan: &WorkoutPlan, full: bool) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PLAN {}", plan.month);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for day in &plan.days {
        println!("  {} — {}", day.date, day.summary);
        if full {
            for item in &day.items {
                match &item.detail {
                    Some(detail) => println!("      {} × {} ({})", item.sets, item.name, detail),
                    None => println!("      {} × {}", item.sets, item.name),
                }
            }
        }
    }

    println!();
}
