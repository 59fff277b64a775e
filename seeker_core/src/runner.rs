//! Synchronous loop helper that closes the feedback loop over a `Process`.
//!
//! The core never calls the process itself; this runner does it on the
//! caller's behalf with the strict request/response cadence `Seeker::next`
//! expects: apply the candidate, measure, feed the measurement back.

use seeker_traits::Process;

use crate::Seeker;

/// Result of driving a seek loop to its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// The measured output entered the acceptable band around the target.
    Converged { ticks: usize, x: f64, y: f64 },
    /// The tick budget ran out first.
    Exhausted { ticks: usize, x: f64, y: f64 },
}

impl SeekOutcome {
    pub fn converged(&self) -> bool {
        matches!(self, SeekOutcome::Converged { .. })
    }
}

/// Drive `seeker` against `process` for at most `max_ticks` control ticks.
/// The first tick feeds a placeholder measurement, which the first-call
/// contract ignores.
pub fn run<P: Process>(seeker: &mut Seeker, process: &mut P, max_ticks: usize) -> SeekOutcome {
    let mut x = 0.0;
    let mut y = 0.0;
    for tick in 1..=max_ticks {
        x = seeker.next(y);
        y = process.respond(x);
        tracing::trace!(tick, x, y, "seek tick");
        if (y - seeker.target()).abs() <= seeker.error() {
            return SeekOutcome::Converged { ticks: tick, x, y };
        }
    }
    SeekOutcome::Exhausted {
        ticks: max_ticks,
        x,
        y,
    }
}

#[cfg(test)]
mod tests {
    use super::{SeekOutcome, run};
    use crate::Seeker;

    #[test]
    fn converges_on_identity_process() {
        let mut seeker = Seeker::builder()
            .target(4.0)
            .error(0.01)
            .lo(0.0)
            .hi(10.0)
            .build()
            .unwrap();
        let outcome = run(&mut seeker, &mut |x: f64| x, 50);
        assert!(outcome.converged(), "outcome: {outcome:?}");
    }

    #[test]
    fn reports_exhaustion_on_a_constant_process() {
        let mut seeker = Seeker::builder()
            .target(4.0)
            .error(0.01)
            .lo(0.0)
            .hi(10.0)
            .build()
            .unwrap();
        // Constant output far from target: the loop can never converge.
        let outcome = run(&mut seeker, &mut |_x: f64| 100.0, 50);
        match outcome {
            SeekOutcome::Exhausted { ticks, x, .. } => {
                assert_eq!(ticks, 50);
                assert!(x.is_finite());
                assert!((0.0..=10.0).contains(&x));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
