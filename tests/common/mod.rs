#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use ticker_dashboard::error::FetchError;
use ticker_dashboard::model::bar::{RawBar, RawSeries, SourceTimestamp};
use ticker_dashboard::model::selection::{ChartType, IndicatorSet, Interval, Period, Selection};
use ticker_dashboard::provider::{FetchRequest, MarketDataProvider};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap()
}

/// One bar per minute starting at `base_time`, open = previous close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<RawBar> {
    let mut prev = closes.first().copied().unwrap_or(0.0);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = base_time() + Duration::minutes(i as i64);
            let bar = RawBar {
                timestamp: SourceTimestamp::Zoned(ts.with_timezone(&FixedOffset::east_opt(0).unwrap())),
                open: prev,
                high: prev.max(close) + 1.0,
                low: prev.min(close) - 1.0,
                close,
                volume: 1_000 + i as u64,
            };
            prev = close;
            bar
        })
        .collect()
}

pub fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64) * 0.5 + ((i % 3) as f64)).collect()
}

pub fn selection(ticker: &str, compare: &str) -> Selection {
    Selection {
        ticker: ticker.to_string(),
        compare_ticker: compare.to_string(),
        period: Period::OneDay,
        interval: Interval::OneMinute,
        chart_type: ChartType::Candlestick,
        indicators: IndicatorSet::empty(),
    }
}

#[derive(Debug, Clone)]
pub enum Canned {
    Bars(Vec<RawBar>),
    Fail(String),
}

/// In-memory provider that records every request it receives.
/// Unknown tickers return an empty series.
#[derive(Default)]
pub struct FakeProvider {
    responses: HashMap<String, Canned>,
    pub calls: Mutex<Vec<FetchRequest>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<RawBar>) -> Self {
        self.responses.insert(ticker.to_string(), Canned::Bars(bars));
        self
    }

    pub fn with_failure(mut self, ticker: &str, message: &str) -> Self {
        self.responses
            .insert(ticker.to_string(), Canned::Fail(message.to_string()));
        self
    }

    pub fn recorded(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl MarketDataProvider for FakeProvider {
    async fn fetch_bars(&self, request: &FetchRequest) -> Result<RawSeries, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.responses.get(&request.ticker) {
            Some(Canned::Bars(bars)) => Ok(RawSeries::new(request.ticker.clone(), bars.clone())),
            Some(Canned::Fail(msg)) => Err(FetchError::Malformed(msg.clone())),
            None => Ok(RawSeries::new(request.ticker.clone(), Vec::new())),
        }
    }
}
