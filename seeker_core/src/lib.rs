#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Adaptive, derivative-free setpoint seeking.
//!
//! Given a black-box process `x -> y`, a [`Seeker`] iteratively chooses the
//! next `x` to try so the measured `y` converges on a caller-specified
//! target, observing only input/output pairs. It is a feedback controller
//! for when no analytic model exists: a bracket of probe points supplies a
//! secant-style step, a decaying slope estimate covers the degenerate cases,
//! and every emitted candidate passes an output filter chain (bound clamps
//! plus smoothing).
//!
//! ## Architecture
//!
//! - **SlopeTracker**: decayed `|dy/dx|` estimate for degenerate fallbacks
//!   (`slope` module)
//! - **FilterChain**: ordered bound-clamp + smoothing pipeline on every
//!   output (`filter` module)
//! - **Seeker**: the bracket state machine, 2-point or 3-point per instance,
//!   with mutable `target`/`error`/`lo`/`hi` settings
//! - **Runner**: drives a `seeker_traits::Process` loop to convergence
//!   (`runner` module)
//!
//! The core is single-threaded and call-and-return: one `next` per control
//! tick, no I/O, no time, no allocation after construction.

pub mod error;
pub mod filter;
pub mod runner;
pub mod slope;

mod pair;
mod seeker;
mod triplet;

pub use error::{BuildError, Result};
pub use filter::{FilterChain, StageKind};
pub use runner::{SeekOutcome, run};
pub use seeker::{BracketKind, Seeker, SeekerBuilder};
pub use slope::SlopeTracker;
