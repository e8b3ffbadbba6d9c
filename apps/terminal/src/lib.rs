//! Terminal front end for the roster drill.

mod console;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use roster_drill_core::DrillSettings;
use roster_drill_core::Trainer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use console::drill;

/// Environment variable naming an optional settings JSON file.
pub const SETTINGS_ENV: &str = "ROSTER_DRILL_SETTINGS";

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let roster_path = std::env::args()
        .nth(1)
        .context("usage: roster-drill <roster.json>")?;

    let settings = match std::env::var(SETTINGS_ENV) {
        Ok(path) => load_settings(Path::new(&path))?,
        Err(_) => DrillSettings::default(),
    };

    let content = std::fs::read_to_string(&roster_path)
        .with_context(|| format!("failed to read roster {}", roster_path))?;

    let mut trainer = Trainer::new(settings);
    let count = trainer.load_roster(&content)?;
    tracing::info!(path = %roster_path, units = count, "roster imported");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    writeln!(output, "Loaded {} units from {}", count, roster_path)?;
    drill(&mut trainer, &mut input, &mut output)
}

fn load_settings(path: &Path) -> anyhow::Result<DrillSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    let settings = DrillSettings::from_json(&content)
        .with_context(|| format!("invalid settings {}", path.display()))?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Read one trimmed line. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
