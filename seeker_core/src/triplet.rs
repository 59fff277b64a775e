//! Three-point bracket: a straddling triple sampled lo, mid, hi per cycle.
//!
//! The wide `lo..hi` span supplies the slope while the mid point anchors the
//! step, which tolerates more measurement noise than a bare pair at the cost
//! of one extra probe per cycle. Unlike the pair variant there is no
//! measurement smoothing; the third sample is the noise defense.

use crate::filter::FilterChain;
use crate::seeker::StepCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unprimed,
    AwaitLo,
    AwaitMid,
    AwaitHi,
}

#[derive(Debug, Clone)]
pub(crate) struct TripletBracket {
    phase: Phase,
    x_lo: f64,
    x_mid: f64,
    x_hi: f64,
    y_lo: f64,
    y_mid: f64,
    y_hi: f64,
}

impl TripletBracket {
    /// Seed a triple spread around whichever of `x0`, `lo`, `hi` are known.
    /// Seeds pass the bound-only clamp.
    pub(crate) fn seed(
        x0: Option<f64>,
        lo: Option<f64>,
        hi: Option<f64>,
        chain: &mut FilterChain,
    ) -> Self {
        let (a, b, c) = match (x0, lo, hi) {
            (Some(x0), _, _) => (0.8 * x0 - 1.0, x0, 1.2 * x0 + 1.0),
            (None, None, Some(hi)) => (0.8 * hi - 2.0, 0.9 * hi - 1.0, hi),
            (None, Some(lo), None) => (lo, 1.1 * lo + 1.0, 1.2 * lo + 2.0),
            (None, Some(lo), Some(hi)) => (
                0.7 * lo + 0.3 * hi,
                0.5 * lo + 0.5 * hi,
                0.3 * lo + 0.7 * hi,
            ),
            (None, None, None) => (1.0, 2.0, 3.0),
        };
        Self {
            phase: Phase::Unprimed,
            x_lo: chain.clamp(a),
            x_mid: chain.clamp(b),
            x_hi: chain.clamp(c),
            y_lo: 0.0,
            y_mid: 0.0,
            y_hi: 0.0,
        }
    }

    pub(crate) fn next(&mut self, measured: f64, ctx: &mut StepCtx<'_>) -> f64 {
        if self.phase == Phase::Unprimed {
            self.phase = Phase::AwaitLo;
            return self.x_lo;
        }

        let y = measured - ctx.target;
        let perfect = y.abs() <= ctx.error;

        match self.phase {
            Phase::Unprimed => unreachable!("handled above"),
            Phase::AwaitLo => {
                self.y_lo = y;
                if perfect {
                    ctx.chain.apply(self.x_lo);
                    self.x_lo
                } else {
                    self.phase = Phase::AwaitMid;
                    self.x_mid
                }
            }
            Phase::AwaitMid => {
                self.y_mid = y;
                if perfect {
                    ctx.chain.apply(self.x_mid);
                    self.x_mid
                } else {
                    self.phase = Phase::AwaitHi;
                    self.x_hi
                }
            }
            Phase::AwaitHi => {
                self.y_hi = y;
                if perfect {
                    ctx.chain.apply(self.x_hi);
                    self.x_hi
                } else {
                    self.advance(ctx);
                    self.phase = Phase::AwaitLo;
                    self.x_lo
                }
            }
        }
    }

    /// Secant step over the completed triple, then re-expand a fresh triple
    /// straddling the estimate via fixed fractional offsets.
    fn advance(&mut self, ctx: &mut StepCtx<'_>) {
        let (x1, y1, dx, dy) = if self.x_mid != self.x_lo {
            if self.x_mid != self.x_hi {
                // All three distinct: anchor at mid, slope across the span.
                let mut y1 = self.y_mid;
                let dy = self.y_hi - self.y_lo;
                if dy * (self.y_hi - self.y_mid) < 0.0 {
                    // Discordant ordering; average out the spurious sign flip.
                    y1 = 0.5 * (self.y_hi + self.y_lo);
                }
                (self.x_mid, y1, self.x_hi - self.x_lo, dy)
            } else {
                // mid == hi: collapse to the distinct pair.
                (
                    0.5 * (self.x_lo + self.x_mid),
                    0.5 * (self.y_lo + self.y_mid),
                    self.x_mid - self.x_lo,
                    self.y_mid - self.y_lo,
                )
            }
        } else if self.x_mid != self.x_hi {
            // mid == lo: collapse to the distinct pair.
            (
                0.5 * (self.x_mid + self.x_hi),
                0.5 * (self.y_mid + self.y_hi),
                self.x_hi - self.x_mid,
                self.y_hi - self.y_mid,
            )
        } else {
            // All three coincide.
            (self.x_mid, self.y_mid, 0.0, 0.0)
        };

        let estimate = if dx == 0.0 || dy == 0.0 {
            let slope = ctx.slope.read();
            tracing::debug!(dx, dy, slope, "degenerate triplet step; slope fallback");
            x1 - y1 / slope
        } else {
            ctx.slope.record(dy, dx);
            x1 - y1 * dx / dy
        };

        let x2 = ctx.chain.apply(estimate);
        self.x_mid = x2;
        self.x_lo = ctx.chain.clamp(0.8 * x2 + 0.2 * x1);
        self.x_hi = ctx.chain.clamp(1.2 * x2 - 0.2 * x1);
        tracing::trace!(
            x_lo = self.x_lo,
            x_mid = self.x_mid,
            x_hi = self.x_hi,
            "triplet bracket update"
        );
    }

    pub(crate) fn shift(&mut self, d: f64) {
        self.x_lo += d;
        self.x_mid += d;
        self.x_hi += d;
    }

    pub(crate) fn reclamp(&mut self, chain: &mut FilterChain) {
        self.x_lo = chain.clamp(self.x_lo);
        self.x_mid = chain.clamp(self.x_mid);
        self.x_hi = chain.clamp(self.x_hi);
    }

    pub(crate) fn reseed(&mut self) {
        self.phase = Phase::Unprimed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slope::SlopeTracker;

    #[test]
    fn bounded_seed_spreads_between_limits() {
        let mut chain = FilterChain::new(Some(0.0), Some(10.0), Some(1.0));
        let b = TripletBracket::seed(None, Some(0.0), Some(10.0), &mut chain);
        assert_eq!((b.x_lo, b.x_mid, b.x_hi), (3.0, 5.0, 7.0));
    }

    #[test]
    fn fully_coincident_triple_stays_finite() {
        let mut chain = FilterChain::new(Some(0.0), Some(10.0), Some(1.0));
        let mut slope = SlopeTracker::new();
        let mut b = TripletBracket::seed(Some(4.0), None, None, &mut chain);
        b.x_lo = 4.0;
        b.x_mid = 4.0;
        b.x_hi = 4.0;
        b.phase = Phase::AwaitHi;
        b.y_lo = 2.0;
        b.y_mid = 2.0;
        let mut c = StepCtx {
            target: 0.0,
            error: 0.001,
            chain: &mut chain,
            slope: &mut slope,
        };
        let out = b.next(2.0, &mut c);
        assert!(out.is_finite());
        assert!((0.0..=10.0).contains(&out));
    }

    #[test]
    fn discordant_measurements_average_the_anchor() {
        let mut chain = FilterChain::new(None, None, Some(1.0));
        let mut slope = SlopeTracker::new();
        let mut b = TripletBracket::seed(None, Some(0.0), Some(10.0), &mut chain);
        b.phase = Phase::AwaitHi;
        // y_mid above both endpoints: dy * (y_hi - y_mid) < 0
        b.y_lo = -1.0;
        b.y_mid = 5.0;
        let mut c = StepCtx {
            target: 0.0,
            error: 0.001,
            chain: &mut chain,
            slope: &mut slope,
        };
        let out = b.next(3.0, &mut c);
        // anchor y replaced by 0.5*(3 + -1) = 1: x2 = 5 - 1*4/4 = 4, lo member 0.8*4+0.2*5
        assert!((out - 4.2).abs() < 1e-9, "got {out}");
    }
}
