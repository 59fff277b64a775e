//! Decaying estimate of the process's absolute local slope.
//!
//! Fed on every non-degenerate bracket update and consulted only when the
//! secant step is undefined (coincident probes). The read alternates sign on
//! purpose: consecutive degenerate ticks must not keep pushing the candidate
//! in the same wrong direction.

/// Decay factor applied to both accumulators on every `record`.
const DECAY: f64 = 0.99999;

/// Sign-alternating, decayed running estimate of `|dy/dx|`.
#[derive(Debug, Clone)]
pub struct SlopeTracker {
    sum_abs_dy: f64,
    sum_abs_dx: f64,
    sign: f64,
}

impl Default for SlopeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SlopeTracker {
    pub fn new() -> Self {
        Self {
            sum_abs_dy: 0.0,
            sum_abs_dx: 0.0,
            sign: -1.0,
        }
    }

    /// Fold one observed `(dy, dx)` pair into the decayed accumulators.
    /// Ignored when `dx == 0`; there is no slope to learn from a vertical pair.
    pub fn record(&mut self, dy: f64, dx: f64) {
        if dx != 0.0 {
            self.sum_abs_dy = DECAY * self.sum_abs_dy + dy.abs();
            self.sum_abs_dx = DECAY * self.sum_abs_dx + dx.abs();
        }
    }

    /// Signed slope estimate. Falls back to magnitude `1` before any history
    /// exists. Flips the sign on every call; callers that need the value
    /// twice must read once and reuse it.
    pub fn read(&mut self) -> f64 {
        let magnitude = if self.sum_abs_dx != 0.0 {
            self.sum_abs_dy / self.sum_abs_dx
        } else {
            1.0
        };
        self.sign = -self.sign;
        self.sign * magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::SlopeTracker;

    #[test]
    fn neutral_fallback_alternates_sign() {
        let mut s = SlopeTracker::new();
        assert_eq!(s.read(), 1.0);
        assert_eq!(s.read(), -1.0);
        assert_eq!(s.read(), 1.0);
    }

    #[test]
    fn estimates_ratio_of_accumulated_magnitudes() {
        let mut s = SlopeTracker::new();
        s.record(6.0, 2.0);
        s.record(-6.0, -2.0);
        // |dy|/|dx| = 12/4 = 3, first read is positive
        let v = s.read();
        assert!((v - 3.0).abs() < 1e-9, "got {v}");
        let v = s.read();
        assert!((v + 3.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn vertical_pairs_are_ignored() {
        let mut s = SlopeTracker::new();
        s.record(5.0, 0.0);
        assert_eq!(s.read(), 1.0); // still no dx history
    }
}
