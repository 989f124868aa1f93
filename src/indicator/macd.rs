use super::ema::Ema;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
}

/// MACD line (fast EMA minus slow EMA) and its signal EMA.
///
/// The signal EMA only starts consuming once the MACD line is defined.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "MACD fast period must be shorter than slow period"
        );
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
            signal: Ema::new(signal_period),
        }
    }

    pub fn push(&mut self, close: f64) -> MacdPoint {
        let fast = self.fast.push(close);
        let slow = self.slow.push(close);
        let macd = match (fast, slow) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        };
        let signal = macd.and_then(|m| self.signal.push(m));
        MacdPoint { macd, signal }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}
