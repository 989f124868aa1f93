use std::fmt;

use anyhow::{bail, Result};

/// Look-back window requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
    Max,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneDay,
        Period::OneWeek,
        Period::OneMonth,
        Period::OneYear,
        Period::Max,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::OneWeek => "1wk",
            Period::OneMonth => "1mo",
            Period::OneYear => "1y",
            Period::Max => "max",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let token = s.trim();
        match Self::ALL.iter().find(|p| p.token() == token) {
            Some(p) => Ok(*p),
            None => bail!(
                "invalid period '{}': expected one of 1d/1wk/1mo/1y/max",
                s
            ),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Sampling interval of each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
    OneWeek,
}

impl Interval {
    pub const ALL: [Interval; 7] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::OneDay,
        Interval::OneWeek,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let token = s.trim();
        match Self::ALL.iter().find(|i| i.token() == token) {
            Some(i) => Ok(*i),
            None => bail!(
                "invalid interval '{}': expected one of 1m/5m/15m/30m/1h/1d/1wk",
                s
            ),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    #[default]
    Candlestick,
    Line,
}

impl ChartType {
    pub fn label(self) -> &'static str {
        match self {
            ChartType::Candlestick => "Candlestick",
            ChartType::Line => "Line",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartType::Candlestick => ChartType::Line,
            ChartType::Line => ChartType::Candlestick,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candlestick" => Ok(ChartType::Candlestick),
            "line" => Ok(ChartType::Line),
            _ => bail!("invalid chart type '{}': expected Candlestick or Line", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Sma20,
    Ema20,
    Rsi,
    Macd,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Sma20,
        Indicator::Ema20,
        Indicator::Rsi,
        Indicator::Macd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Sma20 => "SMA 20",
            Indicator::Ema20 => "EMA 20",
            Indicator::Rsi => "RSI",
            Indicator::Macd => "MACD",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let label = s.trim();
        match Self::ALL
            .iter()
            .find(|i| i.label().eq_ignore_ascii_case(label))
        {
            Some(i) => Ok(*i),
            None => bail!(
                "invalid indicator '{}': expected one of SMA 20/EMA 20/RSI/MACD",
                s
            ),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Indicator::Sma20 => 1,
            Indicator::Ema20 => 1 << 1,
            Indicator::Rsi => 1 << 2,
            Indicator::Macd => 1 << 3,
        }
    }
}

/// Subset of indicators the user switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorSet(u8);

impl IndicatorSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn contains(&self, indicator: Indicator) -> bool {
        self.0 & indicator.bit() != 0
    }

    pub fn insert(&mut self, indicator: Indicator) {
        self.0 |= indicator.bit();
    }

    pub fn toggle(&mut self, indicator: Indicator) {
        self.0 ^= indicator.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::ALL.into_iter().filter(|i| self.contains(*i))
    }
}

impl FromIterator<Indicator> for IndicatorSet {
    fn from_iter<I: IntoIterator<Item = Indicator>>(iter: I) -> Self {
        let mut set = IndicatorSet::empty();
        for indicator in iter {
            set.insert(indicator);
        }
        set
    }
}

/// Everything the user picked; passed explicitly into each render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub ticker: String,
    pub compare_ticker: String,
    pub period: Period,
    pub interval: Interval,
    pub chart_type: ChartType,
    pub indicators: IndicatorSet,
}

/// Returns the element after `current` in `all`, wrapping around.
pub fn cycle_next<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_tokens_roundtrip() {
        for p in Period::ALL {
            assert_eq!(Period::parse(p.token()).unwrap(), p);
        }
        assert!(Period::parse("2y").is_err());
    }

    #[test]
    fn interval_rejects_unknown_token() {
        assert_eq!(Interval::parse(" 1h ").unwrap(), Interval::OneHour);
        assert!(Interval::parse("2m").is_err());
        assert!(Interval::parse("").is_err());
    }

    #[test]
    fn indicator_set_toggle() {
        let mut set = IndicatorSet::empty();
        assert!(set.is_empty());
        set.toggle(Indicator::Rsi);
        assert!(set.contains(Indicator::Rsi));
        assert!(!set.contains(Indicator::Macd));
        set.toggle(Indicator::Rsi);
        assert!(set.is_empty());

        let set: IndicatorSet = [Indicator::Macd, Indicator::Sma20].into_iter().collect();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Indicator::Sma20, Indicator::Macd]
        );
    }

    #[test]
    fn cycle_next_wraps() {
        assert_eq!(cycle_next(&Period::ALL, Period::Max), Period::OneDay);
        assert_eq!(cycle_next(&Period::ALL, Period::OneDay), Period::OneWeek);
    }
}
