use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeline_rs::{AxisDirection, Calibration, Timebase, TimelineError};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid utc datetime")
}

#[test]
fn two_point_calibration_maps_indices_to_instants() {
    let calibration = Calibration::two_point(
        0.0,
        utc(2024, 1, 1, 0, 0, 0),
        3600.0,
        utc(2024, 1, 1, 1, 0, 0),
    )
    .expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    assert_eq!(timebase.seconds_per_index(), 1.0);
    assert_eq!(timebase.to_instant(900.0), utc(2024, 1, 1, 0, 15, 0));
    assert_eq!(timebase.to_instant(7200.0), utc(2024, 1, 1, 2, 0, 0));
    assert_eq!(timebase.to_index(&utc(2024, 1, 1, 0, 15, 0)), 900.0);
}

#[test]
fn round_trip_is_exact_within_tolerance() {
    let calibration =
        Calibration::anchored(10.0, utc(2024, 6, 1, 12, 0, 0), 2.5).expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    for index in [-12_345.678, -1.0, 0.0, 10.0, 14.0, 99_999.25] {
        let recovered = timebase.to_index(&timebase.to_instant(index));
        assert_abs_diff_eq!(recovered, index, epsilon = 1e-6 * index.abs().max(1.0));
    }

    assert_eq!(
        timebase.to_instant(14.0),
        utc(2024, 6, 1, 12, 0, 10),
        "4 index units at 2.5 s/unit span 10 seconds"
    );
}

#[test]
fn degenerate_calibrations_are_rejected() {
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let t1 = utc(2024, 1, 1, 1, 0, 0);

    let same_index = Calibration::two_point(5.0, t0, 5.0, t1);
    assert!(matches!(
        same_index,
        Err(TimelineError::InvalidConfiguration { .. })
    ));

    let same_instant = Calibration::two_point(0.0, t0, 1.0, t0);
    assert!(matches!(
        same_instant,
        Err(TimelineError::InvalidConfiguration { .. })
    ));

    let non_finite = Calibration::two_point(f64::NAN, t0, 1.0, t1);
    assert!(matches!(
        non_finite,
        Err(TimelineError::InvalidConfiguration { .. })
    ));

    let zero_scale = Calibration::anchored(0.0, t0, 0.0);
    assert!(matches!(
        zero_scale,
        Err(TimelineError::InvalidConfiguration { .. })
    ));
}

#[test]
fn backward_calibration_reverses_direction() {
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let t1 = utc(2024, 1, 1, 1, 0, 0);
    let calibration = Calibration::two_point(0.0, t1, 3600.0, t0).expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    assert_eq!(timebase.direction(), AxisDirection::Backward);
    assert_eq!(timebase.seconds_per_index(), -1.0);
    assert_eq!(timebase.to_instant(0.0), t1);
    assert_eq!(timebase.to_instant(3600.0), t0);
    assert!(timebase.to_instant(100.0) > timebase.to_instant(200.0));
}

#[test]
fn forward_mapping_is_monotonic() {
    let calibration = Calibration::unit(utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 2, 0, 0, 0))
        .expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    assert_eq!(timebase.direction(), AxisDirection::Forward);
    let mut previous = timebase.to_instant(-3.0);
    for index in [-1.5, 0.0, 0.25, 1.0, 7.5] {
        let instant = timebase.to_instant(index);
        assert!(instant > previous);
        previous = instant;
    }
}

#[test]
fn index_range_for_maps_a_timeframe() {
    let calibration =
        Calibration::anchored(0.0, utc(2024, 1, 1, 0, 0, 0), 1.0).expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    let (lo, hi) =
        timebase.index_range_for(&utc(2023, 12, 31, 0, 0, 0), &utc(2024, 1, 2, 0, 0, 0));
    assert_eq!(lo, -86_400.0);
    assert_eq!(hi, 86_400.0);
}

#[test]
fn timezone_is_attached_to_converted_instants() {
    let calibration =
        Calibration::anchored(0.0, utc(2024, 1, 1, 5, 0, 0), 1.0).expect("valid calibration");
    let timebase =
        Timebase::new(calibration, chrono_tz::America::New_York).expect("valid timebase");

    let instant = timebase.to_instant(0.0);
    assert_eq!(instant.to_string(), "2024-01-01 00:00:00 EST");
    assert_eq!(instant, utc(2024, 1, 1, 5, 0, 0));
}

#[test]
fn far_out_of_range_indices_clamp_instead_of_panicking() {
    let calibration =
        Calibration::anchored(0.0, utc(2024, 1, 1, 0, 0, 0), 1.0).expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    let far_future = timebase.to_instant(1e18);
    let far_past = timebase.to_instant(-1e18);
    assert!(far_past < timebase.to_instant(0.0));
    assert!(far_future > timebase.to_instant(0.0));
}

#[test]
fn microsecond_offsets_survive_the_round_trip() {
    let calibration =
        Calibration::anchored(0.0, utc(2024, 1, 1, 0, 0, 0), 1.0).expect("valid calibration");
    let timebase = Timebase::new(calibration, chrono_tz::UTC).expect("valid timebase");

    let instant = utc(2024, 1, 1, 0, 0, 1) + TimeDelta::microseconds(250_000);
    let index = timebase.to_index(&instant);
    assert_abs_diff_eq!(index, 1.25, epsilon = 1e-9);
    assert_eq!(timebase.to_instant(index), instant);
}
