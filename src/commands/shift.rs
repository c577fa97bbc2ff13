use anyhow::{Context, Result};
use chrono::Local;
use demodata_core::shift::ShiftJob;

use crate::render::{self, Render};

pub fn run(job: ShiftJob) -> Result<()> {
    println!(
        "{}",
        render::banner(
            "EVENT DATE TRANSFORMATION",
            &[
                ("Source file", job.events_file.display().to_string()),
                ("Backup file", job.backup_file.display().to_string()),
                ("Transformation", format!("All dates {:+} days", job.days)),
            ],
        )
    );

    let outcome = job
        .run(Local::now().fixed_offset())
        .with_context(|| format!("Failed to shift events in {}", job.events_file.display()))?;

    println!("\n{}", render::ok(format!("Loaded {} events", outcome.loaded)));
    if outcome.backup_written {
        println!("{}", render::ok(format!("Backup created at {}", job.backup_file.display())));
    }

    println!("\nTransforming event dates ({:+} days)...", job.days);
    println!("{}", render::thin_rule());
    println!("{}", outcome.report.render());

    println!("{}", outcome.validation.render());

    if !outcome.validation.passed() {
        println!("\n{}", render::error("Validation failed! Not saving transformed data."));
        if outcome.backup_written {
            println!("   Backup remains at {}", job.backup_file.display());
        }
        anyhow::bail!("Validation failed for {}", job.events_file.display());
    }

    if !outcome.saved {
        println!("\n{}", render::warn("Dry run: no files were written"));
        return Ok(());
    }

    println!("\n{}", render::ok(format!("Transformed events saved to {}", job.events_file.display())));

    println!("{}", render::section("TRANSFORMATION COMPLETE"));
    println!("{}", render::ok(format!("{} events transformed", outcome.validation.after_count)));
    println!("{}", render::ok(format!("{} events had dates shifted", outcome.report.changed.len())));
    if !outcome.report.warnings.is_empty() {
        println!(
            "{}",
            render::warn(format!("{} dates could not be parsed and were kept", outcome.report.warnings.len()))
        );
    }
    println!("{}", render::ok("Day-of-week consistency maintained"));
    println!("{}", render::ok(format!("Backup saved at: {}", job.backup_file.display())));
    println!("{}", render::rule());

    Ok(())
}
