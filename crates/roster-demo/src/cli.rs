//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

/// Filter, sort and summarize a record roster the way a list screen does.
///
/// Interactions are replayed through the screen's controls: `--search`
/// types into the search box, each `--pick` opens a facet dropdown, picks
/// an option and closes it, and `--sort` chooses a "Sort by" option.
#[derive(Debug, Parser)]
#[command(name = "roster-demo", version)]
pub struct Cli {
    /// JSON file holding an array of records
    #[arg(long, value_name = "FILE")]
    pub records: PathBuf,

    /// Screen configuration (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Text typed into the search box
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Pick a facet option, e.g. `--pick city=Durg` (repeatable)
    #[arg(long, value_name = "FIELD=VALUE", value_parser = parse_pick)]
    pub pick: Vec<Pick>,

    /// Label of the sort option to apply
    #[arg(long, value_name = "LABEL")]
    pub sort: Option<String>,

    /// Show summary tiles even if the configuration leaves them off
    #[arg(long)]
    pub summary: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One `FIELD=VALUE` pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub field: String,
    pub value: String,
}

fn parse_pick(raw: &str) -> Result<Pick, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok(Pick {
        field: field.to_string(),
        value: value.to_string(),
    })
}
