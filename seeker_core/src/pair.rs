//! Two-point bracket: secant stepping over a probe pair.
//!
//! The pair variant low-passes its measurements with a weight that decays as
//! the run matures, so late-run noise moves the bracket less than early-run
//! signal. The same weight is pushed into the chain's smoothing stage, which
//! keeps successive emitted candidates correlated.

use crate::filter::{FilterChain, StageKind};
use crate::seeker::StepCtx;

/// Per-cycle decay of the measurement weight.
const INPUT_DECAY: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing emitted yet; the next call ignores its argument.
    Unprimed,
    /// First member emitted; its measurement arrives next.
    AwaitFirst,
    /// Second member emitted; its measurement completes the pair.
    AwaitSecond,
}

#[derive(Debug, Clone)]
pub(crate) struct PairBracket {
    phase: Phase,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    // Per-slot smoothed-measurement caches; survive within a bracket cycle.
    last_y0: f64,
    last_y1: f64,
    // Current measurement weight; reset to 1.0 on reseed.
    alpha: f64,
}

impl PairBracket {
    /// Seed the probe pair from whichever of `x0`, `lo`, `hi` are known,
    /// most specific first. Seeds pass the bound-only clamp so initial
    /// probes never violate hard limits.
    pub(crate) fn seed(
        x0: Option<f64>,
        lo: Option<f64>,
        hi: Option<f64>,
        chain: &mut FilterChain,
    ) -> Self {
        let (a, b) = match (x0, lo, hi) {
            (Some(x0), _, _) => (x0, 0.8 * x0 - 1.0),
            (None, None, Some(hi)) => (0.8 * hi - 1.0, hi),
            (None, Some(lo), None) => (lo, 1.2 * lo + 1.0),
            (None, Some(lo), Some(hi)) => (0.6 * lo + 0.4 * hi - 1.0, 0.4 * lo + 0.6 * hi + 1.0),
            (None, None, None) => (1.0, 3.0),
        };
        Self {
            phase: Phase::Unprimed,
            x0: chain.clamp(a),
            x1: chain.clamp(b),
            y0: 0.0,
            y1: 0.0,
            last_y0: 0.0,
            last_y1: 0.0,
            alpha: 1.0,
        }
    }

    pub(crate) fn next(&mut self, measured: f64, ctx: &mut StepCtx<'_>) -> f64 {
        if self.phase == Phase::Unprimed {
            // No prior probe exists, so the argument carries no information.
            self.phase = Phase::AwaitFirst;
            return self.x0;
        }

        let y = measured - ctx.target;
        let perfect = y.abs() <= ctx.error;

        let alpha = self.alpha;
        ctx.chain.set(StageKind::Smooth, Some(alpha));

        match self.phase {
            Phase::Unprimed => unreachable!("handled above"),
            Phase::AwaitFirst => {
                self.alpha *= INPUT_DECAY;
                if perfect {
                    self.y0 = y;
                    self.last_y0 = y;
                    // Retrain the smoothing memory without moving the bracket.
                    ctx.chain.apply(self.x0);
                    self.x0
                } else {
                    self.y0 = alpha * y + (1.0 - alpha) * self.last_y0;
                    self.last_y0 = self.y0;
                    self.phase = Phase::AwaitSecond;
                    self.x1
                }
            }
            Phase::AwaitSecond => {
                if perfect {
                    self.y1 = y;
                    self.last_y1 = y;
                    ctx.chain.apply(self.x1);
                    self.x1
                } else {
                    self.y1 = alpha * y + (1.0 - alpha) * self.last_y1;
                    self.last_y1 = self.y1;
                    let (x0, x1) = self.advance(ctx);
                    self.x0 = x0;
                    self.x1 = x1;
                    self.phase = Phase::AwaitFirst;
                    self.x0
                }
            }
        }
    }

    /// Secant step over the completed pair, producing the next probe pair.
    /// The companion member is the midpoint between the old bracket's center
    /// and the new estimate, which keeps successive probes correlated.
    fn advance(&mut self, ctx: &mut StepCtx<'_>) -> (f64, f64) {
        let xm = 0.5 * (self.x0 + self.x1);
        let ym = 0.5 * (self.y0 + self.y1);
        let dx = self.x0 - self.x1;
        let dy = self.y0 - self.y1;

        let estimate = if dx == 0.0 || dy == 0.0 {
            // No usable local slope; manufacture a direction from history,
            // anchored at the probe closest to the target band.
            let (ax, ay) = if self.y0.abs() < self.y1.abs() {
                (self.x0, self.y0)
            } else {
                (self.x1, self.y1)
            };
            let slope = ctx.slope.read();
            tracing::debug!(dx, dy, slope, "degenerate pair step; slope fallback");
            ax - ay / slope
        } else {
            ctx.slope.record(dy, dx);
            xm - ym * dx / dy
        };

        let x_new = ctx.chain.apply(estimate);
        let companion = ctx.chain.clamp(0.5 * (xm + x_new));
        tracing::trace!(x_new, companion, "pair bracket update");
        (x_new, companion)
    }

    pub(crate) fn shift(&mut self, d: f64) {
        self.x0 += d;
        self.x1 += d;
    }

    pub(crate) fn reclamp(&mut self, chain: &mut FilterChain) {
        self.x0 = chain.clamp(self.x0);
        self.x1 = chain.clamp(self.x1);
    }

    pub(crate) fn reseed(&mut self) {
        self.phase = Phase::Unprimed;
        self.alpha = 1.0;
    }
}
