use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::model::bar::{PriceBar, PriceSeries, RawSeries, SourceTimestamp};

/// Re-stamps every bar in `zone` and orders the rows by instant.
///
/// Naive timestamps are taken to be UTC. Rows sharing an instant keep their
/// provider order.
pub fn normalize(series: RawSeries, zone: Tz) -> PriceSeries {
    let mut bars: Vec<PriceBar> = series
        .bars
        .into_iter()
        .map(|bar| PriceBar {
            datetime: to_zone(bar.timestamp, zone),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        })
        .collect();
    bars.sort_by_key(|b| b.datetime);

    PriceSeries {
        ticker: series.ticker,
        zone,
        bars,
    }
}

fn to_zone(timestamp: SourceTimestamp, zone: Tz) -> DateTime<Tz> {
    match timestamp {
        SourceTimestamp::Naive(naive) => naive.and_utc().with_timezone(&zone),
        SourceTimestamp::Zoned(zoned) => zoned.with_timezone(&zone),
    }
}

/// UTC instant from Unix seconds, as Yahoo reports bar times.
pub fn utc_from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bar::RawBar;
    use chrono::{NaiveDate, Timelike};

    fn raw(ts: SourceTimestamp, close: f64) -> RawBar {
        RawBar {
            timestamp: ts,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1,
        }
    }

    #[test]
    fn naive_is_treated_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        let out = normalize(
            RawSeries::new("AAPL", vec![raw(SourceTimestamp::Naive(naive), 1.0)]),
            chrono_tz::America::New_York,
        );
        // EDT is UTC-4 in July.
        assert_eq!(out.bars[0].datetime.hour(), 10);
        assert_eq!(out.zone, chrono_tz::America::New_York);
    }

    #[test]
    fn utc_from_unix_handles_epoch() {
        assert_eq!(utc_from_unix(0).unwrap().timestamp(), 0);
    }
}
