use keyscene_animation_core::{wrap_time, Playhead};

/// it should wrap the playhead into [0, duration)
#[test]
fn advance_wraps_around_the_timeline() {
    let mut p = Playhead::default();
    assert_eq!(p.advance(1.0, 5.0), 0.0, "paused playhead must not move");
    p.play();
    assert_eq!(p.advance(4.0, 5.0), 4.0);
    assert_eq!(p.advance(2.0, 5.0), 1.0);
    assert_eq!(p.fraction(5.0), 0.2);
    p.pause();
    assert_eq!(p.advance(2.0, 5.0), 1.0);
}

/// it should wrap negative seeks from the end
#[test]
fn seek_wraps_negative_times() {
    let mut p = Playhead::default();
    p.seek(-1.0, 5.0);
    assert_eq!(p.time, 4.0);
    p.seek(5.0, 5.0);
    assert_eq!(p.time, 0.0);
}

/// it should pin time to zero for empty or broken durations
#[test]
fn degenerate_durations_pin_to_zero() {
    assert_eq!(wrap_time(3.0, 0.0), 0.0);
    assert_eq!(wrap_time(3.0, -2.0), 0.0);
    assert_eq!(wrap_time(3.0, f64::NAN), 0.0);
    assert_eq!(wrap_time(f64::INFINITY, 5.0), 0.0);
    assert!(wrap_time(-1e-18, 5.0) < 5.0);
}
