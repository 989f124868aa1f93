use crate::indicator::ema::Ema;
use crate::indicator::macd::Macd;
use crate::indicator::rsi::Rsi;
use crate::indicator::sma::Sma;
use crate::model::bar::PriceSeries;

pub const SMA_WINDOW: usize = 20;
pub const EMA_WINDOW: usize = 20;
pub const RSI_WINDOW: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

pub const COL_SMA_20: &str = "SMA_20";
pub const COL_EMA_20: &str = "EMA_20";
pub const COL_RSI: &str = "RSI";
pub const COL_MACD: &str = "MACD";
pub const COL_MACD_SIGNAL: &str = "MACD_Signal";

/// Derived columns aligned 1:1 with the series rows. `None` marks warm-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorColumns {
    pub sma_20: Vec<Option<f64>>,
    pub ema_20: Vec<Option<f64>>,
    pub rsi_14: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
}

impl IndicatorColumns {
    pub fn len(&self) -> usize {
        self.sma_20.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma_20.is_empty()
    }

    /// `(name, column)` pairs in export order.
    pub fn named(&self) -> [(&'static str, &[Option<f64>]); 5] {
        [
            (COL_SMA_20, self.sma_20.as_slice()),
            (COL_EMA_20, self.ema_20.as_slice()),
            (COL_RSI, self.rsi_14.as_slice()),
            (COL_MACD, self.macd.as_slice()),
            (COL_MACD_SIGNAL, self.macd_signal.as_slice()),
        ]
    }
}

/// A normalized series plus its indicator columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    pub series: PriceSeries,
    pub indicators: IndicatorColumns,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Appends SMA-20, EMA-20, RSI-14 and MACD(12/26/9) computed from closes.
pub fn enrich(series: PriceSeries) -> EnrichedSeries {
    let n = series.len();
    let mut sma = Sma::new(SMA_WINDOW);
    let mut ema = Ema::new(EMA_WINDOW);
    let mut rsi = Rsi::new(RSI_WINDOW);
    let mut macd = Macd::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL);

    let mut cols = IndicatorColumns {
        sma_20: Vec::with_capacity(n),
        ema_20: Vec::with_capacity(n),
        rsi_14: Vec::with_capacity(n),
        macd: Vec::with_capacity(n),
        macd_signal: Vec::with_capacity(n),
    };
    for bar in &series.bars {
        cols.sma_20.push(sma.push(bar.close));
        cols.ema_20.push(ema.push(bar.close));
        cols.rsi_14.push(rsi.push(bar.close));
        let point = macd.push(bar.close);
        cols.macd.push(point.macd);
        cols.macd_signal.push(point.signal);
    }

    EnrichedSeries {
        series,
        indicators: cols,
    }
}
