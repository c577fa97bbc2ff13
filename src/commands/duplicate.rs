use anyhow::{Context, Result};
use demodata_core::duplicate::DuplicateJob;

use crate::render::{self, Render};

pub fn run(job: DuplicateJob) -> Result<()> {
    let filter = &job.filter;

    println!(
        "{}",
        render::banner(
            "DUPLICATE EVENTS",
            &[
                ("Source file", job.events_file.display().to_string()),
                ("Backup file", job.backup_file.display().to_string()),
                (
                    "Strategy",
                    format!(
                        "Duplicate {} events from {} to {} ({:+} days)",
                        filter.category,
                        filter.range.from(),
                        filter.range.to(),
                        filter.days.saturating_neg()
                    ),
                ),
            ],
        )
    );

    let outcome = job
        .run()
        .with_context(|| format!("Failed to duplicate events in {}", job.events_file.display()))?;
    let report = &outcome.report;

    println!("\n{}", render::ok(format!("Loaded {} events", outcome.loaded)));
    if outcome.backup_written {
        println!("{}", render::ok(format!("Backup created at {}", job.backup_file.display())));
    }
    println!(
        "{}",
        render::ok(format!(
            "Found {} {} events to duplicate",
            report.duplicated.len(),
            filter.category
        ))
    );

    println!("\nCreating duplicate events...");
    println!("{}", render::thin_rule());
    println!("{}", report.render());

    if !outcome.saved {
        println!("\n{}", render::warn("Dry run: no files were written"));
        return Ok(());
    }

    println!("\n{}", render::ok(format!("Updated events saved to {}", job.events_file.display())));

    println!("{}", render::section("DUPLICATION COMPLETE"));
    println!("{}", render::ok(format!("Original events: {}", outcome.loaded)));
    println!("{}", render::ok(format!("Duplicated events: {}", report.duplicated.len())));
    println!("{}", render::ok(format!("Total events now: {}", outcome.total)));
    if let Some((first, last)) = report.id_range() {
        println!("{}", render::ok(format!("New event IDs: {} through {}", first, last)));
    }
    println!("{}", render::ok(format!("Backup saved at: {}", job.backup_file.display())));
    println!("{}", render::rule());

    Ok(())
}
