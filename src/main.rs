mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use demodata_core::config::DemoDataConfig;
use demodata_core::date_range::DateRange;
use demodata_core::duplicate::{DuplicateFilter, DuplicateJob};
use demodata_core::shift::ShiftJob;

#[derive(Parser)]
#[command(name = "demodata")]
#[command(about = "Maintenance jobs for the timetable demo events dataset")]
struct Cli {
    /// Config file (defaults to ./demodata.toml, then ~/.config/demodata/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show diagnostic logs (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move every event's dates forward by a fixed number of days
    Shift {
        /// Events file to rewrite
        #[arg(long)]
        file: Option<PathBuf>,

        /// Where to write the pre-transformation backup
        #[arg(long)]
        backup: Option<PathBuf>,

        /// Days to add (a multiple of 7 keeps weekdays)
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Replace the document's _comment with this text
        #[arg(long)]
        comment: Option<String>,

        /// Transform and validate without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Copy events of one category and week into an earlier window
    Duplicate {
        /// Events file to rewrite
        #[arg(long)]
        file: Option<PathBuf>,

        /// Where to write the pre-duplication backup
        #[arg(long)]
        backup: Option<PathBuf>,

        /// Category to copy (e.g. "academic")
        #[arg(long)]
        category: Option<String>,

        /// First day to copy, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to copy, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Days to subtract from the copies' dates (negative copies forward)
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Replace the document's _comment with this text
        #[arg(long)]
        comment: Option<String>,

        /// Duplicate without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Report integrity problems in the events file
    Check {
        /// Events file to check
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DemoDataConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Shift {
            file,
            backup,
            days,
            comment,
            dry_run,
        } => commands::shift::run(ShiftJob {
            events_file: file.unwrap_or(config.events_file),
            backup_file: backup.unwrap_or(config.shift.backup_file),
            days: days.unwrap_or(config.shift.days),
            comment,
            dry_run,
        }),
        Commands::Duplicate {
            file,
            backup,
            category,
            from,
            to,
            days,
            comment,
            dry_run,
        } => {
            let range = DateRange::from_args(
                from.as_deref().unwrap_or(&config.duplicate.from),
                to.as_deref().unwrap_or(&config.duplicate.to),
            )?;

            commands::duplicate::run(DuplicateJob {
                events_file: file.unwrap_or(config.events_file),
                backup_file: backup.unwrap_or(config.duplicate.backup_file),
                filter: DuplicateFilter {
                    category: category.unwrap_or(config.duplicate.category),
                    range,
                    days: days.unwrap_or(config.duplicate.days),
                },
                comment,
                dry_run,
            })
        }
        Commands::Check { file } => {
            commands::check::run(&file.unwrap_or(config.events_file))
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from errors only.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn duplicate_flags_parse() {
        let cli = Cli::try_parse_from([
            "demodata",
            "duplicate",
            "--category",
            "social",
            "--from",
            "2025-11-03",
            "--to",
            "2025-11-09",
            "--days",
            "7",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Duplicate {
                category,
                from,
                to,
                days,
                dry_run,
                ..
            } => {
                assert_eq!(category.as_deref(), Some("social"));
                assert_eq!(from.as_deref(), Some("2025-11-03"));
                assert_eq!(to.as_deref(), Some("2025-11-09"));
                assert_eq!(days, Some(7));
                assert!(dry_run);
            }
            _ => panic!("expected duplicate"),
        }
    }

    #[test]
    fn shift_accepts_negative_days_and_global_flags() {
        let cli = Cli::try_parse_from(["demodata", "shift", "--days", "-28", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Shift { days: Some(-28), .. }));
    }

    #[test]
    fn duplicate_accepts_negative_days() {
        let cli = Cli::try_parse_from(["demodata", "duplicate", "--days", "-7"]).unwrap();
        assert!(matches!(cli.command, Commands::Duplicate { days: Some(-7), .. }));
    }
}
