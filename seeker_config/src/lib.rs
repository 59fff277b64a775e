#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for seeker runs.
//!
//! `Config` is deserialized from TOML and validated before use. It covers
//! the controller settings (`[seek]`), the simulated process the harness
//! closes the loop with (`[process]`), and run bookkeeping (`[run]`).

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub seek: SeekCfg,
    #[serde(default)]
    pub process: ProcessCfg,
    #[serde(default)]
    pub run: RunCfg,
}

/// Controller settings.
///
/// Example:
/// ```toml
/// [seek]
/// target = 4.0
/// error = 0.01
/// lo = 0.0
/// hi = 10.0
/// bracket = "pair"
/// ```
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SeekCfg {
    /// Desired process output.
    pub target: f64,
    /// Half-width of the acceptable band; defaults in the core to 1% of
    /// `|target|` when absent.
    pub error: Option<f64>,
    /// Inclusive bounds on emitted inputs; inverted values are swapped by
    /// the core, not rejected here.
    pub lo: Option<f64>,
    pub hi: Option<f64>,
    /// Initial guess seeding the bracket.
    pub x0: Option<f64>,
    #[serde(default)]
    pub bracket: Bracket,
}

/// Which bracket design the controller runs.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    #[default]
    Pair,
    Triplet,
}

/// Simulated process for the harness loop.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ProcessCfg {
    pub kind: ProcessKind,
    /// Gain: `a*x + b` (linear) or `a*x^2 + b` (quadratic).
    pub a: f64,
    pub b: f64,
    /// Uniform measurement noise amplitude; 0 disables.
    pub noise: f64,
    /// Noise generator seed (xorshift).
    pub seed: u32,
}

impl Default for ProcessCfg {
    fn default() -> Self {
        Self {
            kind: ProcessKind::Linear,
            a: 1.0,
            b: 0.0,
            noise: 0.0,
            seed: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    #[default]
    Linear,
    Quadratic,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct RunCfg {
    /// Control ticks to run before giving up.
    pub ticks: usize,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self { ticks: 200 }
    }
}

impl Config {
    /// Parse and validate a TOML string.
    pub fn from_toml(s: &str) -> eyre::Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read config {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        eyre::ensure!(self.seek.target.is_finite(), "seek.target must be finite");
        for (v, name) in [
            (self.seek.error, "seek.error"),
            (self.seek.lo, "seek.lo"),
            (self.seek.hi, "seek.hi"),
            (self.seek.x0, "seek.x0"),
        ] {
            if let Some(v) = v {
                eyre::ensure!(v.is_finite(), "{name} must be finite");
            }
        }
        eyre::ensure!(
            self.process.a.is_finite() && self.process.b.is_finite(),
            "process gain/offset must be finite"
        );
        eyre::ensure!(
            self.process.noise.is_finite() && self.process.noise >= 0.0,
            "process.noise must be >= 0"
        );
        eyre::ensure!(self.run.ticks > 0, "run.ticks must be > 0");
        Ok(())
    }
}
