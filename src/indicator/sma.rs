use std::collections::VecDeque;

/// Rolling mean over the last `period` values.
///
/// A non-finite input poisons the average for as long as it stays inside the
/// window, then drops out again.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    window: VecDeque<f64>,
    finite_sum: f64,
    non_finite: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            period,
            window: VecDeque::with_capacity(period),
            finite_sum: 0.0,
            non_finite: 0,
        }
    }

    /// Push a new value, return the current SMA once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.window.len() == self.period {
            if let Some(evicted) = self.window.pop_front() {
                self.forget(evicted);
            }
        }
        if value.is_finite() {
            self.finite_sum += value;
        } else {
            self.non_finite += 1;
        }
        self.window.push_back(value);
        self.value()
    }

    fn forget(&mut self, value: f64) {
        if value.is_finite() {
            self.finite_sum -= value;
        } else {
            self.non_finite -= 1;
        }
    }

    pub fn value(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        if self.non_finite > 0 {
            return Some(f64::NAN);
        }
        Some(self.finite_sum / self.period as f64)
    }

    pub fn is_ready(&self) -> bool {
        self.window.len() == self.period
    }

    pub fn period(&self) -> usize {
        self.period
    }
}
