//! Simulated processes for closing the loop without real hardware.

use seeker_config::{ProcessCfg, ProcessKind};
use seeker_traits::Process;

/// Linear or quadratic response with optional uniform measurement noise.
pub struct SimProcess {
    cfg: ProcessCfg,
    state: u32,
}

impl SimProcess {
    pub fn new(cfg: ProcessCfg) -> Self {
        Self {
            cfg,
            // xorshift must not start at zero
            state: cfg.seed.max(1),
        }
    }

    // Tiny xorshift PRNG; uniform in [-noise, +noise].
    fn noise(&mut self) -> f64 {
        if self.cfg.noise == 0.0 {
            return 0.0;
        }
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        let unit = f64::from(x) / (f64::from(u32::MAX) + 1.0);
        (unit * 2.0 - 1.0) * self.cfg.noise
    }
}

impl Process for SimProcess {
    fn respond(&mut self, x: f64) -> f64 {
        let base = match self.cfg.kind {
            ProcessKind::Linear => self.cfg.a * x + self.cfg.b,
            ProcessKind::Quadratic => self.cfg.a * x * x + self.cfg.b,
        };
        base + self.noise()
    }
}
