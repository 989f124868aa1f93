mod common;

use chrono_tz::America::New_York;

use ticker_dashboard::enrich::{enrich, COL_MACD_SIGNAL, COL_SMA_20};
use ticker_dashboard::model::bar::RawSeries;
use ticker_dashboard::normalize::normalize;

fn enriched(closes: &[f64]) -> ticker_dashboard::enrich::EnrichedSeries {
    enrich(normalize(
        RawSeries::new("AAPL", common::bars_from_closes(closes)),
        New_York,
    ))
}

#[test]
fn columns_align_with_rows() {
    let data = enriched(&common::ramp(60));
    assert_eq!(data.len(), 60);
    for (_, col) in data.indicators.named() {
        assert_eq!(col.len(), 60);
    }
}

#[test]
fn warm_up_windows() {
    let data = enriched(&common::ramp(60));
    let cols = &data.indicators;

    let leading_none = |col: &[Option<f64>]| col.iter().take_while(|v| v.is_none()).count();
    assert_eq!(leading_none(&cols.sma_20), 19);
    assert_eq!(leading_none(&cols.ema_20), 19);
    assert_eq!(leading_none(&cols.rsi_14), 13);
    assert_eq!(leading_none(&cols.macd), 25);
    assert_eq!(leading_none(&cols.macd_signal), 33);

    for col in [&cols.sma_20, &cols.ema_20, &cols.rsi_14, &cols.macd, &cols.macd_signal] {
        assert!(col
            .iter()
            .skip_while(|v| v.is_none())
            .all(|v| v.is_some_and(f64::is_finite)));
    }
}

#[test]
fn sma_matches_naive_mean() {
    let closes = common::ramp(30);
    let data = enriched(&closes);
    for i in 19..30 {
        let naive: f64 = closes[i - 19..=i].iter().sum::<f64>() / 20.0;
        assert!((data.indicators.sma_20[i].unwrap() - naive).abs() < 1e-9);
    }
}

#[test]
fn short_series_is_all_warm_up() {
    let data = enriched(&[1.0, 2.0, 3.0]);
    assert_eq!(data.len(), 3);
    assert!(data.indicators.sma_20.iter().all(Option::is_none));
    assert!(data.indicators.macd.iter().all(Option::is_none));
}

#[test]
fn non_finite_close_propagates_without_panicking() {
    let mut closes = common::ramp(40);
    closes[30] = f64::NAN;
    let data = enriched(&closes);
    assert!(data.indicators.sma_20[30].unwrap().is_nan());
    assert!(data.indicators.ema_20[39].unwrap().is_nan());
}

#[test]
fn column_names() {
    let data = enriched(&[1.0]);
    let names: Vec<_> = data.indicators.named().iter().map(|(n, _)| *n).collect();
    assert_eq!(names.first(), Some(&COL_SMA_20));
    assert_eq!(names.last(), Some(&COL_MACD_SIGNAL));
    assert_eq!(names, vec!["SMA_20", "EMA_20", "RSI", "MACD", "MACD_Signal"]);
}
