/// Exponential Moving Average with `alpha = 2 / (period + 1)`.
///
/// The recursion is seeded with the first observation and the output is
/// withheld until `period` observations have been seen.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: f64,
    ema: Option<f64>,
    count: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self::with_alpha(period, 2.0 / (period as f64 + 1.0))
    }

    /// EMA with an explicit smoothing factor, e.g. Wilder's `1 / period`.
    pub fn with_alpha(period: usize, alpha: f64) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        assert!(alpha > 0.0 && alpha <= 1.0, "EMA alpha must be in (0, 1]");
        Self {
            period,
            alpha,
            ema: None,
            count: 0,
        }
    }

    /// Push a new value, return the current EMA once warmed up.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let next = match self.ema {
            Some(prev) => prev + self.alpha * (value - prev),
            None => value,
        };
        self.ema = Some(next);
        self.count += 1;
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.is_ready() {
            self.ema
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }
}
