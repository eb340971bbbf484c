use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use departure_board::board::{Board, BoardConfig, StyleTable};
use departure_board::config::Cli;
use departure_board::logging::init_logging;
use departure_board::shutdown::Shutdown;
use departure_board::transit::{DepartureSource, MockTransitClient, TransitClient, TransitConfig};
use departure_board::tui::BoardUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    let log_path = init_logging(cli.log_file.as_deref()).context("failed to set up logging")?;

    let transit = TransitClient::new(TransitConfig::default().with_base_url(&cli.base_url))?;

    if let Some(query) = &cli.search {
        let matches = transit.search_stations(query).await?;
        println!("Found {} station(s):", matches.len());
        for station in &matches {
            println!("  {} - {}", station.id, station.name);
        }
        return Ok(());
    }

    if cli.needs_station_lookup() {
        let query = cli.station.clone().unwrap_or_default();
        let station = transit
            .search_stations(&query)
            .await?
            .into_iter()
            .next()
            .with_context(|| format!("no station matches {query:?}"))?;
        info!(id = %station.id, name = %station.name, "resolved station");
        cli.id = Some(station.id.to_string());
    }

    let config = cli.board_config()?;
    info!(
        stops = config.stops.len(),
        refresh_secs = config.refresh_interval.as_secs(),
        log = %log_path.display(),
        "starting departure board"
    );

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    match &cli.mock_dir {
        Some(dir) => {
            let mock = MockTransitClient::from_dir(dir)
                .with_context(|| format!("failed to load mock data from {}", dir.display()))?;
            run(mock, config, shutdown).await
        }
        None => run(transit, config, shutdown).await,
    }
}

/// Start the refresh task, run the UI on a blocking thread, and stop both
/// once either side asks to.
async fn run<S: DepartureSource + 'static>(
    source: S,
    config: BoardConfig,
    shutdown: Shutdown,
) -> anyhow::Result<()> {
    let board = Board::new(source, config.stops, StyleTable::default());
    let ui = BoardUi::new(board.viewport(), config.render_interval, shutdown.clone());
    let refresh = board.spawn(config.refresh_interval, shutdown.clone());

    let result = tokio::task::spawn_blocking(move || ui.run()).await;
    shutdown.trigger();
    if let Err(e) = refresh.await {
        warn!("refresh task failed: {e}");
    }

    result
        .context("ui thread panicked")?
        .context("terminal error")?;
    info!("departure board stopped");
    Ok(())
}

fn spawn_signal_handler(shutdown: Shutdown) {
    tokio::spawn(async move { shutdown.trigger_on(termination_signal()).await });
}

/// Resolves on SIGINT or SIGTERM; errors if no signal can be listened for.
async fn termination_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => result,
                    Some(()) = term.recv() => Ok(()),
                }
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                tokio::signal::ctrl_c().await
            }
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await
}
