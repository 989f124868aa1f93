use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use tokio::sync::{mpsc, watch};

use ticker_dashboard::config::Config;
use ticker_dashboard::event::AppEvent;
use ticker_dashboard::export;
use ticker_dashboard::input::parse_key_event;
use ticker_dashboard::provider::yahoo::YahooChartClient;
use ticker_dashboard::refresh::{run_refresh_worker, RefreshChannels, RefreshContext};
use ticker_dashboard::ui::{self, AppState, CommandEffect};

fn export_current(app_state: &mut AppState, config: &Config) {
    let Some(primary) = app_state
        .snapshot
        .as_ref()
        .and_then(|s| s.primary.ready())
    else {
        app_state.push_log("[WARN] Nothing to export: no data for the selected ticker".to_string());
        return;
    };
    match export::write_csv(&config.dashboard.export_dir, &primary.data) {
        Ok(path) => app_state.push_log(format!("Exported {}", path.display())),
        Err(e) => {
            tracing::error!(error = %e, "CSV export failed");
            app_state.apply(AppEvent::Error(format!("Export failed: {:#}", e)));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or set TICKER_DASHBOARD_CONFIG");
            std::process::exit(1);
        }
    };

    // Log to a file so output doesn't interfere with the TUI
    let log_file = std::fs::File::create(&config.logging.file)
        .with_context(|| format!("failed to create {}", config.logging.file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(&config.logging.level)
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    let selection = config.dashboard.initial_selection()?;
    let watchlist = config.watchlist();
    let zone = config.dashboard.display_zone()?;
    tracing::info!(
        ticker = %selection.ticker,
        compare = %selection.compare_ticker,
        provider = %config.provider.base_url,
        zone = %zone,
        watchlist = watchlist.len(),
        "Starting ticker-dashboard"
    );

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(64);
    let (manual_tx, manual_rx) = mpsc::channel::<()>(4);
    let (selection_tx, selection_rx) = watch::channel(selection.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let client = YahooChartClient::new(&config.provider.base_url, &config.provider.user_agent)?;
    tokio::spawn(run_refresh_worker(
        client,
        RefreshContext {
            watchlist: watchlist.clone(),
            zone,
            interval: Duration::from_secs(config.dashboard.refresh_interval_secs),
        },
        RefreshChannels {
            selection_rx,
            manual_rx,
            app_tx: app_tx.clone(),
            shutdown_rx: shutdown_rx.clone(),
        },
    ));

    // SIGINT sent from outside the terminal
    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(
        selection,
        watchlist,
        config.dashboard.refresh_interval_secs,
    );
    app_state.table_rows = config.ui.table_rows;
    app_state.push_log(format!(
        "ticker-dashboard started | refresh every {}s",
        config.dashboard.refresh_interval_secs
    ));

    loop {
        while let Ok(event) = app_rx.try_recv() {
            app_state.apply(event);
        }

        terminal.draw(|frame| ui::render(frame, &app_state))?;

        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = parse_key_event(&key) {
                    match app_state.handle_command(cmd) {
                        CommandEffect::None => {}
                        CommandEffect::SelectionChanged => {
                            tracing::info!(command = ?cmd, "selection changed");
                            let _ = selection_tx.send(app_state.selection.clone());
                        }
                        CommandEffect::RefreshRequested => {
                            let _ = manual_tx.try_send(());
                        }
                        CommandEffect::ExportRequested => export_current(&mut app_state, &config),
                        CommandEffect::Quit => {
                            tracing::info!("User quit");
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                    }
                }
            }
        }

        if *shutdown_rx.borrow() {
            break;
        }
    }

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check {} for details.", config.logging.file.display());
    Ok(())
}
