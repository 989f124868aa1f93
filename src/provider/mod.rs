pub mod yahoo;

use std::future::Future;

use chrono::{DateTime, Duration, Utc};

use crate::error::FetchError;
use crate::model::bar::RawSeries;
use crate::model::selection::{Interval, Period};

/// Window handed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// Provider-native look-back token such as `1d` or `max`.
    Period(Period),
    Explicit {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticker: String,
    pub interval: Interval,
    pub range: RangeSpec,
}

impl FetchRequest {
    /// A week is requested as the trailing 7 calendar days ending at `now`;
    /// every other period goes through as the provider's own token.
    pub fn new(ticker: &str, period: Period, interval: Interval, now: DateTime<Utc>) -> Self {
        let range = match period {
            Period::OneWeek => RangeSpec::Explicit {
                start: now - Duration::days(7),
                end: now,
            },
            other => RangeSpec::Period(other),
        };
        Self {
            ticker: ticker.trim().to_ascii_uppercase(),
            interval,
            range,
        }
    }
}

/// Source of OHLCV bars. One call per request, no caching.
pub trait MarketDataProvider {
    fn fetch_bars(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<RawSeries, FetchError>> + Send;
}

/// Result of one guarded fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data(RawSeries),
    NoData { ticker: String },
    Failed { ticker: String, message: String },
}

/// Runs one request. Empty results and provider errors become terminal
/// outcomes instead of errors.
pub async fn fetch_series<P: MarketDataProvider>(
    provider: &P,
    request: &FetchRequest,
) -> FetchOutcome {
    tracing::debug!(
        ticker = %request.ticker,
        interval = %request.interval,
        range = ?request.range,
        "fetching bars"
    );
    match provider.fetch_bars(request).await {
        Ok(series) if series.is_empty() => {
            tracing::warn!(
                ticker = %request.ticker,
                "no data found; ticker may be delisted or has no price data"
            );
            FetchOutcome::NoData {
                ticker: request.ticker.clone(),
            }
        }
        Ok(series) => {
            tracing::debug!(ticker = %request.ticker, rows = series.len(), "fetched bars");
            FetchOutcome::Data(series)
        }
        Err(e) => {
            tracing::error!(ticker = %request.ticker, error = %e, "fetch failed");
            FetchOutcome::Failed {
                ticker: request.ticker.clone(),
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn week_uses_explicit_trailing_range() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap();
        let req = FetchRequest::new("aapl", Period::OneWeek, Interval::FiveMinutes, now);
        assert_eq!(req.ticker, "AAPL");
        assert_eq!(
            req.range,
            RangeSpec::Explicit {
                start: Utc.with_ymd_and_hms(2024, 5, 3, 15, 0, 0).unwrap(),
                end: now,
            }
        );
    }

    #[test]
    fn other_periods_pass_through() {
        let now = Utc::now();
        for period in [Period::OneDay, Period::OneMonth, Period::OneYear, Period::Max] {
            let req = FetchRequest::new("MSFT", period, Interval::OneDay, now);
            assert_eq!(req.range, RangeSpec::Period(period));
        }
    }
}
