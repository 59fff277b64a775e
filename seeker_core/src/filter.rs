//! Output filter pipeline applied to every candidate the controller emits.
//!
//! An ordered list of tagged stages processed in a loop: lower-bound clamp,
//! upper-bound clamp, then exponential smoothing. Bounds run before smoothing
//! so the smoothing memory only ever trains on legal values; since smoothing
//! is a convex blend, its output then stays legal too. A stage whose value is
//! `None` passes through untouched. Stages are addressed by kind for the
//! name-keyed get/set the controller's bound setters need.

/// Discriminator for stage lookup and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    LowerBound,
    UpperBound,
    Smooth,
}

#[derive(Debug, Clone)]
struct Stage {
    kind: StageKind,
    value: Option<f64>,
    /// Memory cell: for bounds the last output, for `Smooth` the previous
    /// raw sample the blend is taken against.
    last: Option<f64>,
}

impl Stage {
    fn apply(&mut self, x: f64) -> f64 {
        let out = match (self.kind, self.value) {
            (StageKind::LowerBound, Some(b)) => x.max(b),
            (StageKind::UpperBound, Some(b)) => x.min(b),
            (StageKind::Smooth, Some(decay)) => {
                let prev = self.last;
                self.last = Some(x);
                match prev {
                    Some(p) => decay * x + (1.0 - decay) * p,
                    None => x,
                }
            }
            _ => x,
        };
        if self.kind != StageKind::Smooth {
            self.last = Some(out);
        }
        out
    }
}

/// Ordered value-transform pipeline with by-kind parameter access.
#[derive(Debug, Clone)]
pub struct FilterChain {
    stages: Vec<Stage>,
}

impl FilterChain {
    /// Build the full pipeline. All three stages are always present so a
    /// bound configured later (via `set`) takes effect without rebuilding;
    /// unset stages pass through. `lo > hi` is normalized by swapping.
    pub fn new(lo: Option<f64>, hi: Option<f64>, smooth_decay: Option<f64>) -> Self {
        let mut chain = Self {
            stages: vec![
                Stage {
                    kind: StageKind::LowerBound,
                    value: lo,
                    last: None,
                },
                Stage {
                    kind: StageKind::UpperBound,
                    value: hi,
                    last: None,
                },
                Stage {
                    kind: StageKind::Smooth,
                    value: smooth_decay,
                    last: None,
                },
            ],
        };
        chain.normalize_bounds();
        chain
    }

    /// Run `x` through every stage in order.
    pub fn apply(&mut self, x: f64) -> f64 {
        self.stages.iter_mut().fold(x, |v, s| s.apply(v))
    }

    /// Run `x` through the bound stages only; seeding and re-clamping must
    /// not disturb the smoothing memory.
    pub fn clamp(&mut self, x: f64) -> f64 {
        self.stages
            .iter_mut()
            .filter(|s| s.kind != StageKind::Smooth)
            .fold(x, |v, s| s.apply(v))
    }

    /// Parameter of the stage with the given kind.
    pub fn get(&self, kind: StageKind) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.kind == kind)
            .and_then(|s| s.value)
    }

    /// Update the stage with the given kind, irrespective of position.
    /// Changing a bound re-normalizes `lo <= hi` and pulls the smoothing
    /// memory into the new interval so a stale history cannot leak an
    /// out-of-range blend.
    pub fn set(&mut self, kind: StageKind, value: Option<f64>) {
        if let Some(s) = self.stages.iter_mut().find(|s| s.kind == kind) {
            s.value = value;
        }
        if kind != StageKind::Smooth {
            self.normalize_bounds();
            self.clamp_smooth_memory();
        }
    }

    fn normalize_bounds(&mut self) {
        let lo = self.get(StageKind::LowerBound);
        let hi = self.get(StageKind::UpperBound);
        if let (Some(l), Some(h)) = (lo, hi)
            && l > h
        {
            self.set_value(StageKind::LowerBound, Some(h));
            self.set_value(StageKind::UpperBound, Some(l));
        }
    }

    fn clamp_smooth_memory(&mut self) {
        let lo = self.get(StageKind::LowerBound);
        let hi = self.get(StageKind::UpperBound);
        if let Some(s) = self.stages.iter_mut().find(|s| s.kind == StageKind::Smooth)
            && let Some(mem) = s.last.as_mut()
        {
            if let Some(l) = lo {
                *mem = mem.max(l);
            }
            if let Some(h) = hi {
                *mem = mem.min(h);
            }
        }
    }

    // Raw value write without normalization; used by the swap itself.
    fn set_value(&mut self, kind: StageKind, value: Option<f64>) {
        if let Some(s) = self.stages.iter_mut().find(|s| s.kind == kind) {
            s.value = value;
        }
    }
}
