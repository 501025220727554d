//! roster-demo: drive a roster screen from the command line.
//!
//! ```bash
//! roster-demo --records data/doctors.json --config data/doctors.yaml \
//!     --pick city=Durg --sort "Most visits" --summary
//! ```

mod app;
mod cli;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::render::Palette;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut screen = app::build_screen(&cli)?;
    app::replay(&mut screen, &cli)?;
    tracing::info!(results = screen.len(), "evaluated roster");

    if cli.json {
        println!("{}", render::render_json(&screen)?);
    } else {
        print!("{}", render::render_text(&screen, &Palette::colored()));
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from warn.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
