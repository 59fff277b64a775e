//! Shared trait surface for the seeker stack.
//!
//! The core controller never calls the process itself; it only receives
//! measurements through `Seeker::next`. `Process` is the interface the
//! runner and harnesses use to close the loop.

/// A black-box process under control: maps an input `x` to a measured
/// output `y`. Implementations may be stateful (e.g. carry a noise
/// generator), hence `&mut self`.
pub trait Process {
    fn respond(&mut self, x: f64) -> f64;
}

/// Any `FnMut(f64) -> f64` closure is a process.
impl<F> Process for F
where
    F: FnMut(f64) -> f64,
{
    fn respond(&mut self, x: f64) -> f64 {
        self(x)
    }
}
