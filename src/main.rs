use anyhow::{Context, Result};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use frogger::app::App;
use frogger::config::Settings;
use frogger::formatter::FrameFormatter;

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .event_format(FrameFormatter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).expect("Could not set global default");

    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        rows = settings.game.board.rows(),
        columns = settings.game.board.columns(),
        seed = ?settings.run.seed,
        "Settings loaded"
    );

    let mut app = App::new(settings).context("Failed to start game")?;
    let reports = app.run();

    let final_score = reports.last().map_or(0, |report| report.score);
    info!(rounds = reports.len(), final_score, "Run complete");
    Ok(())
}
