// tests/margin.rs
// The margin contract, verified by simulation rather than memorized
// constants: a returned margin must sit exactly on the 75% boundary step.

use acad_margin::margin::{compute_margin, AttendanceRecord, MarginError, MAX_CONDUCTED, THRESHOLD};

fn ratio(present: u32, conducted: u32) -> f64 {
    present as f64 / conducted as f64 * 100.0
}

/// For m >= 0: skipping m more sessions keeps the ratio at/above 75,
/// skipping one more drops it below.
fn check_nonnegative(conducted: u32, absent: u32, m: i32) {
    let m = m as u32;
    let present = conducted - absent;
    assert!(
        ratio(present, conducted + m) >= THRESHOLD,
        "({conducted},{absent}): margin {m} already below threshold"
    );
    assert!(
        ratio(present, conducted + m + 1) < THRESHOLD,
        "({conducted},{absent}): margin {m} not maximal"
    );
}

/// For m < 0: attending |m| consecutive sessions reaches 75, and |m| is
/// minimal.
fn check_negative(conducted: u32, absent: u32, m: i32) {
    let k = m.unsigned_abs();
    let present = conducted - absent;
    assert!(
        ratio(present + k, conducted + k) >= THRESHOLD,
        "({conducted},{absent}): attending {k} does not reach threshold"
    );
    assert!(
        ratio(present + k - 1, conducted + k - 1) < THRESHOLD,
        "({conducted},{absent}): {k} not minimal"
    );
}

#[test]
fn perfect_attendance_margin_is_maximal_skippable() {
    let m = compute_margin(40, 0).unwrap();
    assert!(m > 0);
    check_nonnegative(40, 0, m);
}

#[test]
fn exactly_on_threshold_yields_zero() {
    // present=3, conducted=4 → exactly 75%: the below-threshold branch runs
    // zero iterations.
    assert_eq!(compute_margin(4, 1).unwrap(), 0);
}

#[test]
fn below_threshold_margin_is_minimal_catchup() {
    let m = compute_margin(4, 2).unwrap();
    assert!(m < 0);
    check_negative(4, 2, m);
}

#[test]
fn boundary_step_property_holds_across_grid() {
    for conducted in 1..=60u32 {
        for absent in 0..=conducted {
            let m = compute_margin(conducted, absent).unwrap();
            if m >= 0 {
                check_nonnegative(conducted, absent, m);
            } else {
                check_negative(conducted, absent, m);
            }
        }
    }
}

#[test]
fn margin_is_pure() {
    for _ in 0..3 {
        assert_eq!(compute_margin(37, 5), compute_margin(37, 5));
    }
}

#[test]
fn margin_monotone_in_absences() {
    let mut prev = i32::MAX;
    for absent in 0..=40u32 {
        let m = compute_margin(40, absent).unwrap();
        assert!(m <= prev, "margin rose when absences grew: {prev} -> {m}");
        prev = m;
    }
}

#[test]
fn zero_conducted_is_rejected() {
    assert_eq!(compute_margin(0, 0), Err(MarginError::NoSessions));
    assert!(AttendanceRecord::new(0, 0).is_err());
}

#[test]
fn absent_above_conducted_is_rejected() {
    assert_eq!(
        compute_margin(10, 11),
        Err(MarginError::AbsentExceedsConducted { absent: 11, conducted: 10 })
    );
}

#[test]
fn absurd_counters_are_rejected_before_stepping() {
    // A mangled cell can still parse as a huge u32. The catch-up loop would
    // take billions of steps and blow past i32 on the way, so such counters
    // must never reach it.
    assert_eq!(
        compute_margin(4_000_000_000, 4_000_000_000),
        Err(MarginError::ImplausibleConducted(4_000_000_000))
    );
    assert_eq!(
        compute_margin(u32::MAX, 0),
        Err(MarginError::ImplausibleConducted(u32::MAX))
    );
}

#[test]
fn plausibility_bound_is_inclusive() {
    assert!(compute_margin(MAX_CONDUCTED, 0).is_ok());
    // Worst case inside the bound: full catch-up from zero present.
    let m = compute_margin(MAX_CONDUCTED, MAX_CONDUCTED).unwrap();
    check_negative(MAX_CONDUCTED, MAX_CONDUCTED, m);
    assert_eq!(
        compute_margin(MAX_CONDUCTED + 1, 0),
        Err(MarginError::ImplausibleConducted(MAX_CONDUCTED + 1))
    );
}

#[test]
fn record_accessors_round_trip() {
    let rec = AttendanceRecord::new(40, 10).unwrap();
    assert_eq!(rec.conducted(), 40);
    assert_eq!(rec.absent(), 10);
    assert_eq!(rec.margin(), compute_margin(40, 10).unwrap());
}
