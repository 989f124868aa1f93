use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;

/// Timestamp as delivered by a provider, with or without zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTimestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

/// One OHLCV bar before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub timestamp: SourceTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Provider output for one ticker, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub ticker: String,
    pub bars: Vec<RawBar>,
}

impl RawSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<RawBar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

/// One OHLCV bar stamped in the display zone.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub datetime: DateTime<Tz>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Chronologically ordered bars for one ticker; first/last rows are the
/// window open/close.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub zone: Tz,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Converts back into provider form, keeping the zone offsets.
    pub fn into_raw(self) -> RawSeries {
        let bars = self
            .bars
            .into_iter()
            .map(|b| RawBar {
                timestamp: SourceTimestamp::Zoned(b.datetime.fixed_offset()),
                open: b.open,
                high: b.high,
                low: b.low,
                close: b.close,
                volume: b.volume,
            })
            .collect();
        RawSeries {
            ticker: self.ticker,
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bullish_and_bearish_bars() {
        let dt = chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .unwrap();
        let mut bar = PriceBar {
            datetime: dt,
            open: 100.0,
            high: 105.0,
            low: 99.0,
            close: 102.0,
            volume: 10,
        };
        assert!(bar.is_bullish());
        bar.close = 95.0;
        assert!(!bar.is_bullish());
    }

    #[test]
    fn into_raw_keeps_offset() {
        let dt = chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 1, 2, 9, 30, 0)
            .unwrap();
        let series = PriceSeries {
            ticker: "AAPL".to_string(),
            zone: chrono_tz::America::New_York,
            bars: vec![PriceBar {
                datetime: dt,
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 1,
            }],
        };
        let raw = series.into_raw();
        match raw.bars[0].timestamp {
            SourceTimestamp::Zoned(ts) => {
                assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
                assert_eq!(ts, dt.fixed_offset());
            }
            SourceTimestamp::Naive(_) => panic!("expected zoned timestamp"),
        }
    }
}
