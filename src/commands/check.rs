use std::path::Path;

use anyhow::{Context, Result};
use demodata_core::EventsDocument;
use demodata_core::check::check_events;

use crate::render::{self, Render};

pub fn run(events_file: &Path) -> Result<()> {
    println!(
        "{}",
        render::banner(
            "EVENTS INTEGRITY CHECK",
            &[("Source file", events_file.display().to_string())],
        )
    );

    let doc = EventsDocument::load(events_file)
        .with_context(|| format!("Failed to load {}", events_file.display()))?;

    let report = check_events(&doc.events);
    println!("{}", report.render());

    if !report.is_valid() {
        anyhow::bail!("Integrity check failed for {}", events_file.display());
    }

    Ok(())
}
