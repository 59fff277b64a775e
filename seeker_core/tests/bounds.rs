use proptest::prelude::*;
use seeker_core::{BracketKind, Seeker};

prop_compose! {
    fn measurements_strategy()(
        values in prop::collection::vec(-1e6f64..1e6f64, 1..120),
    ) -> Vec<f64> {
        values
    }
}

proptest! {
    /// With both bounds set, every emitted candidate lies in
    /// [lo, hi] regardless of the measurement sequence.
    #[test]
    fn pair_respects_both_bounds(measurements in measurements_strategy(), target in -100.0f64..100.0) {
        let mut seeker = Seeker::builder()
            .target(target)
            .lo(-5.0)
            .hi(5.0)
            .build()
            .unwrap();
        for y in measurements {
            let x = seeker.next(y);
            prop_assert!(x.is_finite());
            prop_assert!((-5.0..=5.0).contains(&x), "emitted {x}");
        }
    }

    #[test]
    fn triplet_respects_both_bounds(measurements in measurements_strategy(), target in -100.0f64..100.0) {
        let mut seeker = Seeker::builder()
            .target(target)
            .lo(-5.0)
            .hi(5.0)
            .bracket(BracketKind::Triplet)
            .build()
            .unwrap();
        for y in measurements {
            let x = seeker.next(y);
            prop_assert!(x.is_finite());
            prop_assert!((-5.0..=5.0).contains(&x), "emitted {x}");
        }
    }

    /// A single configured bound is still honored on every emission.
    #[test]
    fn single_lower_bound_is_honored(measurements in measurements_strategy()) {
        let mut seeker = Seeker::builder().target(10.0).lo(0.0).build().unwrap();
        for y in measurements {
            let x = seeker.next(y);
            prop_assert!(x >= 0.0, "emitted {x}");
        }
    }

    #[test]
    fn single_upper_bound_is_honored(measurements in measurements_strategy()) {
        let mut seeker = Seeker::builder().target(10.0).hi(3.0).build().unwrap();
        for y in measurements {
            let x = seeker.next(y);
            prop_assert!(x <= 3.0, "emitted {x}");
        }
    }

    /// Bounds keep holding across mid-run target changes.
    #[test]
    fn bounds_hold_across_retargets(
        measurements in measurements_strategy(),
        retarget in -500.0f64..500.0,
    ) {
        let mut seeker = Seeker::builder()
            .target(4.0)
            .lo(0.0)
            .hi(10.0)
            .build()
            .unwrap();
        let n = measurements.len();
        for (i, y) in measurements.into_iter().enumerate() {
            if i == n / 2 {
                seeker.set_target(retarget);
            }
            let x = seeker.next(y);
            prop_assert!((0.0..=10.0).contains(&x), "emitted {x}");
        }
    }
}
