use crate::model::bar::PriceSeries;

/// Summary scalars over the whole displayed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    pub last_close: f64,
    /// Last close minus the close of the first row in the window.
    pub change: f64,
    /// `change / first_close * 100`; non-finite when the first close is zero.
    pub pct_change: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl SummaryMetrics {
    /// `None` for an empty series.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;
        let change = last.close - first.close;
        let high = series
            .bars
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low = series
            .bars
            .iter()
            .map(|b| b.low)
            .fold(f64::INFINITY, f64::min);
        let volume = series
            .bars
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.volume));
        Some(Self {
            last_close: last.close,
            change,
            pct_change: change / first.close * 100.0,
            high,
            low,
            volume,
        })
    }
}

/// Sidebar readout: last price against the session open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntradayQuote {
    pub last_price: f64,
    pub change: f64,
    pub pct_change: f64,
}

impl IntradayQuote {
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let open = series.first()?.open;
        let last_price = series.last()?.close;
        let change = last_price - open;
        Some(Self {
            last_price,
            change,
            pct_change: change / open * 100.0,
        })
    }
}

/// Formats `1234567` as `1,234,567`.
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_grouping() {
        assert_eq!(format_volume(0), "0");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(1_000), "1,000");
        assert_eq!(format_volume(1_234_567), "1,234,567");
    }
}
