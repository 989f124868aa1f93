use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::enrich::{enrich, EnrichedSeries};
use crate::metrics::{IntradayQuote, SummaryMetrics};
use crate::model::bar::{PriceSeries, RawSeries};
use crate::model::selection::{Interval, Period, Selection};
use crate::normalize::normalize;
use crate::provider::{fetch_series, FetchOutcome, FetchRequest, MarketDataProvider};
use crate::watchlist::Watchlist;

/// Outcome of one independently guarded part of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    NoData { ticker: String },
    Failed { ticker: String, message: String },
}

impl<T> Section<T> {
    fn from_outcome(outcome: FetchOutcome, build: impl FnOnce(RawSeries) -> Option<T>) -> Self {
        match outcome {
            FetchOutcome::Data(raw) => {
                let ticker = raw.ticker.clone();
                match build(raw) {
                    Some(view) => Section::Ready(view),
                    None => Section::NoData { ticker },
                }
            }
            FetchOutcome::NoData { ticker } => Section::NoData { ticker },
            FetchOutcome::Failed { ticker, message } => Section::Failed { ticker, message },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    /// Warning or error line for a section that did not render.
    pub fn notice(&self) -> Option<String> {
        match self {
            Section::Ready(_) => None,
            Section::NoData { ticker } => Some(format!(
                "[WARN] No data found for {}. It may be delisted or there is no price data available.",
                ticker
            )),
            Section::Failed { ticker, message } => {
                Some(format!("[ERR] Error fetching data for {}: {}", ticker, message))
            }
        }
    }
}

/// Main chart, tables and headline metrics for the selected ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryView {
    pub name: String,
    pub data: EnrichedSeries,
    pub metrics: SummaryMetrics,
}

/// Second ticker drawn against the primary close.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub name: String,
    pub series: PriceSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistQuote {
    pub symbol: String,
    pub name: String,
    pub quote: Section<IntradayQuote>,
}

/// Everything one render pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub selection: Selection,
    pub primary: Section<PrimaryView>,
    pub comparison: Section<ComparisonView>,
    pub quotes: Vec<WatchlistQuote>,
    /// When the pass began; the refresh timer is measured from here.
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn notices(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.extend(self.primary.notice());
        out.extend(self.comparison.notice());
        out.extend(self.quotes.iter().filter_map(|q| q.quote.notice()));
        out
    }
}

fn build_primary(raw: RawSeries, zone: Tz, name: &str) -> Option<PrimaryView> {
    let data = enrich(normalize(raw, zone));
    let metrics = SummaryMetrics::from_series(&data.series)?;
    Some(PrimaryView {
        name: name.to_string(),
        data,
        metrics,
    })
}

/// Fetches, normalizes, enriches and summarizes everything the page shows.
///
/// Order is primary, comparison, then each watchlist entry on 1d/1m. Calls
/// run one after another and a failure only affects its own section.
pub async fn run_render_pass<P: MarketDataProvider>(
    provider: &P,
    selection: &Selection,
    watchlist: &Watchlist,
    zone: Tz,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let primary_req = FetchRequest::new(
        &selection.ticker,
        selection.period,
        selection.interval,
        now,
    );
    let primary_name = watchlist.display_name(&primary_req.ticker).to_string();
    let primary = Section::from_outcome(fetch_series(provider, &primary_req).await, |raw| {
        build_primary(raw, zone, &primary_name)
    });

    let compare_req = FetchRequest::new(
        &selection.compare_ticker,
        selection.period,
        selection.interval,
        now,
    );
    let compare_name = watchlist.display_name(&compare_req.ticker).to_string();
    let comparison = Section::from_outcome(fetch_series(provider, &compare_req).await, |raw| {
        let series = normalize(raw, zone);
        (!series.is_empty()).then(|| ComparisonView {
            name: compare_name.clone(),
            series,
        })
    });

    let mut quotes = Vec::with_capacity(watchlist.len());
    for entry in watchlist.entries() {
        let req = FetchRequest::new(&entry.symbol, Period::OneDay, Interval::OneMinute, now);
        let quote = Section::from_outcome(fetch_series(provider, &req).await, |raw| {
            IntradayQuote::from_series(&normalize(raw, zone))
        });
        quotes.push(WatchlistQuote {
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            quote,
        });
    }

    let snapshot = DashboardSnapshot {
        selection: selection.clone(),
        primary,
        comparison,
        quotes,
        started_at: now,
        completed_at: Utc::now(),
    };
    tracing::info!(
        ticker = %selection.ticker,
        compare = %selection.compare_ticker,
        period = %selection.period,
        interval = %selection.interval,
        primary_ready = snapshot.primary.is_ready(),
        comparison_ready = snapshot.comparison.is_ready(),
        quotes_ready = snapshot.quotes.iter().filter(|q| q.quote.is_ready()).count(),
        elapsed_ms = (snapshot.completed_at - snapshot.started_at).num_milliseconds(),
        "render pass complete"
    );
    snapshot
}
