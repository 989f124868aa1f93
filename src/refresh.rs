use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::dashboard::run_render_pass;
use crate::event::AppEvent;
use crate::model::selection::Selection;
use crate::provider::MarketDataProvider;
use crate::watchlist::Watchlist;

/// Fixed inputs of the refresh worker.
pub struct RefreshContext {
    pub watchlist: Watchlist,
    pub zone: Tz,
    pub interval: Duration,
}

/// Channels the worker listens on and reports to.
pub struct RefreshChannels {
    pub selection_rx: watch::Receiver<Selection>,
    pub manual_rx: mpsc::Receiver<()>,
    pub app_tx: mpsc::Sender<AppEvent>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Seconds left until the next scheduled pass.
pub fn seconds_until_refresh(
    last_completed: Option<DateTime<Utc>>,
    interval_secs: u64,
    now: DateTime<Utc>,
) -> u64 {
    let Some(last) = last_completed else {
        return 0;
    };
    let elapsed = (now - last).num_seconds().max(0) as u64;
    interval_secs.saturating_sub(elapsed)
}

/// Runs a render pass on the first tick, every `ctx.interval` after that,
/// and right away whenever the selection changes or a manual refresh is
/// requested. Passes are sequential, so they never overlap.
pub async fn run_refresh_worker<P>(provider: P, ctx: RefreshContext, channels: RefreshChannels)
where
    P: MarketDataProvider + Send + Sync + 'static,
{
    let RefreshChannels {
        mut selection_rx,
        mut manual_rx,
        app_tx,
        mut shutdown_rx,
    } = channels;
    let mut ticker = tokio::time::interval(ctx.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let trigger = tokio::select! {
            _ = ticker.tick() => None,
            changed = selection_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                ticker.reset();
                Some("selection changed")
            }
            Some(()) = manual_rx.recv() => {
                ticker.reset();
                Some("manual refresh")
            }
            _ = shutdown_rx.changed() => {
                break;
            }
        };
        if *shutdown_rx.borrow() {
            break;
        }

        let selection = selection_rx.borrow_and_update().clone();
        if let Some(reason) = trigger {
            tracing::info!(reason, ticker = %selection.ticker, "refresh requested");
            let _ = app_tx
                .send(AppEvent::LogMessage(format!(
                    "{}: refreshing {} ({} / {})",
                    reason, selection.ticker, selection.period, selection.interval
                )))
                .await;
        }
        let _ = app_tx
            .send(AppEvent::RefreshStarted {
                ticker: selection.ticker.clone(),
            })
            .await;
        let snapshot =
            run_render_pass(&provider, &selection, &ctx.watchlist, ctx.zone, Utc::now()).await;
        if app_tx.send(AppEvent::Snapshot(Box::new(snapshot))).await.is_err() {
            tracing::info!("UI channel closed, refresh worker exiting");
            break;
        }
    }
    tracing::info!("Refresh worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn countdown_counts_down_from_interval() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 7).unwrap();
        assert_eq!(seconds_until_refresh(Some(last), 20, now), 13);
        assert_eq!(seconds_until_refresh(Some(last), 5, now), 0);
        assert_eq!(seconds_until_refresh(None, 20, now), 0);
    }

    #[test]
    fn countdown_ignores_clock_skew() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 10).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(seconds_until_refresh(Some(last), 20, now), 20);
    }
}
