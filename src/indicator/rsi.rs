use super::ema::Ema;

/// Relative Strength Index with Wilder smoothing.
///
/// The first observation contributes a zero gain and a zero loss, so the
/// first value is produced on the `period`-th push.
#[derive(Debug, Clone)]
pub struct Rsi {
    prev_close: Option<f64>,
    avg_gain: Ema,
    avg_loss: Ema,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        let alpha = 1.0 / period as f64;
        Self {
            prev_close: None,
            avg_gain: Ema::with_alpha(period, alpha),
            avg_loss: Ema::with_alpha(period, alpha),
        }
    }

    pub fn push(&mut self, close: f64) -> Option<f64> {
        let delta = self.prev_close.map(|prev| close - prev).unwrap_or(0.0);
        self.prev_close = Some(close);

        // NaN deltas compare false on both sides and count as no movement.
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        let avg_gain = self.avg_gain.push(gain);
        let avg_loss = self.avg_loss.push(loss);
        Self::compute(avg_gain?, avg_loss?)
    }

    pub fn value(&self) -> Option<f64> {
        Self::compute(self.avg_gain.value()?, self.avg_loss.value()?)
    }

    pub fn period(&self) -> usize {
        self.avg_gain.period()
    }

    fn compute(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            return Some(100.0);
        }
        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}
