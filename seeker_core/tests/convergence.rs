use rstest::rstest;
use seeker_core::{BracketKind, Seeker, run};

/// Monotone linear process, wide bounds containing the root.
#[rstest]
#[case::identity(1.0, 0.0)]
#[case::steep(3.0, -2.0)]
#[case::shallow(0.5, 1.0)]
#[case::descending(-2.0, 12.0)]
fn linear_process_converges_within_fifty_ticks(#[case] a: f64, #[case] b: f64) {
    let mut seeker = Seeker::builder()
        .target(4.0)
        .error(0.01)
        .lo(-20.0)
        .hi(20.0)
        .build()
        .unwrap();
    let outcome = run(&mut seeker, &mut |x: f64| a * x + b, 50);
    assert!(outcome.converged(), "a={a} b={b}: {outcome:?}");
}

#[rstest]
#[case::pair(BracketKind::Pair)]
#[case::triplet(BracketKind::Triplet)]
fn quadratic_process_converges(#[case] kind: BracketKind) {
    let mut seeker = Seeker::builder()
        .target(4.0)
        .error(0.01)
        .lo(0.0)
        .hi(10.0)
        .bracket(kind)
        .build()
        .unwrap();
    let outcome = run(&mut seeker, &mut |x: f64| x * x, 50);
    assert!(outcome.converged(), "{kind:?}: {outcome:?}");
}

#[rstest]
#[case::pair(BracketKind::Pair)]
#[case::triplet(BracketKind::Triplet)]
fn initial_guess_near_root_converges_fast(#[case] kind: BracketKind) {
    let mut seeker = Seeker::builder()
        .target(10.0)
        .error(0.2)
        .x0(9.0)
        .bracket(kind)
        .build()
        .unwrap();
    let outcome = run(&mut seeker, &mut |x: f64| x, 20);
    assert!(outcome.converged(), "{kind:?}: {outcome:?}");
}

#[test]
fn unbounded_linear_process_converges() {
    let mut seeker = Seeker::builder().target(100.0).build().unwrap();
    let outcome = run(&mut seeker, &mut |x: f64| 2.0 * x, 50);
    assert!(outcome.converged(), "{outcome:?}");
}

#[test]
fn converges_again_after_target_change() {
    let mut seeker = Seeker::builder()
        .target(4.0)
        .error(0.01)
        .lo(0.0)
        .hi(10.0)
        .build()
        .unwrap();
    let mut process = |x: f64| x;
    let outcome = run(&mut seeker, &mut process, 50);
    assert!(outcome.converged(), "{outcome:?}");

    seeker.set_target(6.0);
    let outcome = run(&mut seeker, &mut process, 50);
    assert!(outcome.converged(), "after retarget: {outcome:?}");
}

#[test]
fn perfect_measurement_holds_the_probe() {
    let mut seeker = Seeker::builder().target(4.0).error(0.5).x0(4.0).build().unwrap();
    let first = seeker.next(0.0);
    // A measurement inside the band: the controller repeats its probe.
    let held = seeker.next(4.1);
    assert_eq!(held, first);
    for _ in 0..5 {
        assert_eq!(seeker.next(4.1), first);
    }
}
