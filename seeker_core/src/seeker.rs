//! The seeker controller: bracket state machine plus output filter chain.

use crate::error::{BuildError, Result};
use crate::filter::{FilterChain, StageKind};
use crate::pair::PairBracket;
use crate::slope::SlopeTracker;
use crate::triplet::TripletBracket;

/// Which bracket design drives the controller. Exactly one is active per
/// instance for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketKind {
    /// Two probes per cycle; secant over the pair with measurement smoothing.
    #[default]
    Pair,
    /// Three probes per cycle; wider span, no measurement smoothing.
    Triplet,
}

#[derive(Debug, Clone)]
enum Bracket {
    Pair(PairBracket),
    Triplet(TripletBracket),
}

/// Mutable controller context handed into the bracket state machines.
pub(crate) struct StepCtx<'a> {
    pub(crate) target: f64,
    pub(crate) error: f64,
    pub(crate) chain: &'a mut FilterChain,
    pub(crate) slope: &'a mut SlopeTracker,
}

/// Adaptive, derivative-free setpoint controller.
///
/// Each call to [`Seeker::next`] consumes the measurement produced by the
/// previously returned candidate and yields the next input to try. All
/// emitted candidates pass the filter chain, so configured bounds always
/// hold on output. Stepping never fails; coincident probes and missing slope
/// history are handled as designed fallback branches.
///
/// ```
/// use seeker_core::Seeker;
///
/// let mut seeker = Seeker::builder()
///     .target(4.0)
///     .error(0.01)
///     .lo(0.0)
///     .hi(10.0)
///     .build()
///     .unwrap();
///
/// let mut y = 0.0;
/// for _ in 0..50 {
///     let x = seeker.next(y);
///     y = x * x; // the process under control
/// }
/// assert!((y - 4.0).abs() <= 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Seeker {
    target: f64,
    error: f64,
    chain: FilterChain,
    slope: SlopeTracker,
    bracket: Bracket,
}

impl Seeker {
    /// Start building a Seeker.
    pub fn builder() -> SeekerBuilder {
        SeekerBuilder::default()
    }

    /// Advance one control tick: consume the measurement from the previous
    /// candidate, return the next candidate. The very first call has no
    /// prior candidate and ignores its argument.
    pub fn next(&mut self, measured_y: f64) -> f64 {
        let mut ctx = StepCtx {
            target: self.target,
            error: self.error,
            chain: &mut self.chain,
            slope: &mut self.slope,
        };
        match &mut self.bracket {
            Bracket::Pair(b) => b.next(measured_y, &mut ctx),
            Bracket::Triplet(b) => b.next(measured_y, &mut ctx),
        }
    }

    /// Desired output value.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target. Live bracket members are shifted by
    /// `delta / slope_estimate` so the controller does not relearn the
    /// bracket from scratch, then sampling restarts. The slope estimate is
    /// read once and reused; its sign alternation is part of the contract.
    pub fn set_target(&mut self, target: f64) {
        let scale = self.slope.read();
        let shift = (target - self.target) / scale;
        match &mut self.bracket {
            Bracket::Pair(b) => b.shift(shift),
            Bracket::Triplet(b) => b.shift(shift),
        }
        // The shift may have pushed members past a hard limit.
        self.reclamp();
        tracing::debug!(old = self.target, new = target, shift, "target changed");
        self.target = target;
        self.reseed();
    }

    /// Half-width of the acceptable band around the target.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Change the acceptable band; negative inputs are folded to their
    /// magnitude. Triggers a sampling restart; the bracket is preserved.
    pub fn set_error(&mut self, error: f64) {
        self.error = error.abs();
        tracing::debug!(error = self.error, "error band changed");
        self.reseed();
    }

    /// Lower hard bound on emitted candidates, if configured.
    pub fn lo(&self) -> Option<f64> {
        self.chain.get(StageKind::LowerBound)
    }

    /// Update (or clear) the lower bound in place. Bracket members are
    /// re-clamped immediately and sampling restarts.
    pub fn set_lo(&mut self, lo: Option<f64>) {
        self.chain.set(StageKind::LowerBound, lo);
        self.reclamp();
        tracing::debug!(?lo, "lower bound changed");
        self.reseed();
    }

    /// Upper hard bound on emitted candidates, if configured.
    pub fn hi(&self) -> Option<f64> {
        self.chain.get(StageKind::UpperBound)
    }

    /// Update (or clear) the upper bound in place. Bracket members are
    /// re-clamped immediately and sampling restarts.
    pub fn set_hi(&mut self, hi: Option<f64>) {
        self.chain.set(StageKind::UpperBound, hi);
        self.reclamp();
        tracing::debug!(?hi, "upper bound changed");
        self.reseed();
    }

    fn reclamp(&mut self) {
        match &mut self.bracket {
            Bracket::Pair(b) => b.reclamp(&mut self.chain),
            Bracket::Triplet(b) => b.reclamp(&mut self.chain),
        }
    }

    // Restart sampling at the initial phase. Bracket coordinates, slope
    // history, and smoothing memory all survive a reseed.
    fn reseed(&mut self) {
        match &mut self.bracket {
            Bracket::Pair(b) => b.reseed(),
            Bracket::Triplet(b) => b.reseed(),
        }
    }
}

/// Builder for [`Seeker`]. Validated on `build()`.
#[derive(Debug, Clone, Default)]
pub struct SeekerBuilder {
    target: Option<f64>,
    error: Option<f64>,
    lo: Option<f64>,
    hi: Option<f64>,
    x0: Option<f64>,
    kind: BracketKind,
}

impl SeekerBuilder {
    /// Desired output value (required).
    pub fn target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Half-width of the acceptable output band. Defaults to 1% of
    /// `|target|`, or `0.01` when the target is zero.
    pub fn error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }

    /// Inclusive lower bound on emitted candidates.
    pub fn lo(mut self, lo: f64) -> Self {
        self.lo = Some(lo);
        self
    }

    /// Inclusive upper bound on emitted candidates.
    pub fn hi(mut self, hi: f64) -> Self {
        self.hi = Some(hi);
        self
    }

    /// Initial guess seeding the bracket.
    pub fn x0(mut self, x0: f64) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Bracket design; defaults to [`BracketKind::Pair`].
    pub fn bracket(mut self, kind: BracketKind) -> Self {
        self.kind = kind;
        self
    }

    /// Validate and build. Inverted bounds are normalized by swapping, never
    /// rejected; non-finite inputs are.
    pub fn build(self) -> Result<Seeker> {
        let target = self
            .target
            .ok_or_else(|| eyre::Report::new(BuildError::MissingTarget))?;
        if !target.is_finite() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "target must be finite",
            )));
        }
        for (value, what) in [
            (self.error, "error must be finite"),
            (self.lo, "lo must be finite"),
            (self.hi, "hi must be finite"),
            (self.x0, "x0 must be finite"),
        ] {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(eyre::Report::new(BuildError::InvalidConfig(what)));
            }
        }

        let error = match self.error {
            Some(e) => e.abs(),
            None if target == 0.0 => 0.01,
            None => 0.01 * target.abs(),
        };

        // Normalize inverted bounds before seeding; the chain repeats the
        // same normalization on later bound updates.
        let (lo, hi) = match (self.lo, self.hi) {
            (Some(l), Some(h)) if l > h => (Some(h), Some(l)),
            other => other,
        };

        // Smoothing defaults to decay 1.0 (pass-through); the pair variant
        // tightens it as the run matures.
        let mut chain = FilterChain::new(lo, hi, Some(1.0));
        let bracket = match self.kind {
            BracketKind::Pair => Bracket::Pair(PairBracket::seed(self.x0, lo, hi, &mut chain)),
            BracketKind::Triplet => {
                Bracket::Triplet(TripletBracket::seed(self.x0, lo, hi, &mut chain))
            }
        };

        Ok(Seeker {
            target,
            error,
            chain,
            slope: SlopeTracker::new(),
            bracket,
        })
    }
}
