//! Loading inputs and replaying interactions against a screen.

use std::path::Path;

use anyhow::{bail, Context, Result};
use roster::prelude::*;

use crate::cli::{Cli, Pick};

/// Reads a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Loads the configuration and records and builds the screen.
pub fn build_screen(cli: &Cli) -> Result<RosterScreen<Record>> {
    let mut config = RosterConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    if cli.summary {
        config.include_summary = true;
    }
    let records = load_records(&cli.records)?;
    Ok(RosterScreen::from_config(&config, records))
}

/// Replays the command-line interactions: search, then picks in order,
/// then sort.
pub fn replay(screen: &mut RosterScreen<Record>, cli: &Cli) -> Result<()> {
    if let Some(text) = &cli.search {
        type_search(screen, text)?;
    }
    for pick in &cli.pick {
        pick_option(screen, pick)?;
    }
    if let Some(label) = &cli.sort {
        choose_sort(screen, label)?;
    }
    Ok(())
}

fn type_search(screen: &mut RosterScreen<Record>, text: &str) -> Result<()> {
    let control = Control::Search;
    screen.handle(&control, SelectorInput::Open)?;
    screen.handle(&control, SelectorInput::Type(text.to_string()))?;
    screen.handle(&control, SelectorInput::Close)?;
    Ok(())
}

fn pick_option(screen: &mut RosterScreen<Record>, pick: &Pick) -> Result<()> {
    let control = Control::facet(pick.field.as_str());
    let Some(selector) = screen.selector(&control) else {
        let known: Vec<&str> = screen.facets().iter().map(|f| f.field.as_str()).collect();
        bail!(
            "no facet on field '{}' (facets: {})",
            pick.field,
            known.join(", ")
        );
    };
    if selector.find_option(&pick.value).is_none() {
        let known: Vec<&str> = selector.options().iter().map(|o| o.value.as_str()).collect();
        bail!(
            "'{}' is not an option of facet '{}' (options: {})",
            pick.value,
            pick.field,
            known.join(", ")
        );
    }

    screen.handle(&control, SelectorInput::Open)?;
    screen.handle(&control, SelectorInput::Pick(pick.value.clone()))?;
    screen.handle(&control, SelectorInput::Close)?;
    Ok(())
}

fn choose_sort(screen: &mut RosterScreen<Record>, label: &str) -> Result<()> {
    if !screen.sort_options().iter().any(|o| o.label == label) {
        let known: Vec<&str> = screen.sort_options().iter().map(|o| o.label.as_str()).collect();
        bail!("unknown sort '{}' (sort options: {})", label, known.join(", "));
    }
    let control = Control::Sort;
    screen.handle(&control, SelectorInput::Open)?;
    screen.handle(&control, SelectorInput::Pick(label.to_string()))?;
    screen.handle(&control, SelectorInput::Close)?;
    Ok(())
}
