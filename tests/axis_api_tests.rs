use chrono::{DateTime, Offset, TimeZone, Utc};
use timeline_rs::{
    AnchorPolicy, AxisDirection, Calibration, TickInterval, TimelineAxis, TimelineAxisConfig,
    TimelineError,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid utc datetime")
}

fn second_scale_axis() -> TimelineAxis {
    let calibration = Calibration::two_point(
        0.0,
        utc(2024, 1, 1, 0, 0, 0),
        3600.0,
        utc(2024, 1, 1, 1, 0, 0),
    )
    .expect("valid calibration");
    let config = TimelineAxisConfig::from_calibration(calibration).with_timezone(chrono_tz::UTC);
    TimelineAxis::new(config).expect("valid axis")
}

#[test]
fn fifteen_minute_marks_label_two_hours() {
    let axis = second_scale_axis();
    let marks = axis
        .ticks_for(TickInterval::Minutes15, 0.0, 7200.0)
        .expect("valid query");

    let indices: Vec<f64> = marks.iter().map(|mark| mark.index).collect();
    assert_eq!(
        indices,
        vec![0.0, 900.0, 1800.0, 2700.0, 3600.0, 4500.0, 5400.0, 6300.0, 7200.0]
    );

    let labels: Vec<&str> = marks
        .iter()
        .map(|mark| mark.label.as_deref().expect("labeled mark"))
        .collect();
    assert_eq!(
        labels,
        vec!["00:00", "00:15", "00:30", "00:45", "01:00", "01:15", "01:30", "01:45", "02:00"]
    );
}

#[test]
fn day_marks_around_new_year_in_new_york() {
    let calibration =
        Calibration::anchored(0.0, utc(2024, 1, 1, 0, 0, 0), 1.0).expect("valid calibration");
    let config = TimelineAxisConfig::from_calibration(calibration)
        .with_timezone(chrono_tz::America::New_York);
    let axis = TimelineAxis::new(config).expect("valid axis");

    let marks = axis
        .ticks_for(TickInterval::Day, -86_400.0, 86_400.0)
        .expect("valid query");

    // Exactly the two local midnights bounding the range.
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].index, -68_400.0);
    assert_eq!(marks[1].index, 18_000.0);
    assert_eq!(marks[0].label.as_deref(), Some("2023-12-31"));
    assert_eq!(marks[1].label.as_deref(), Some("2024-01-01"));
}

#[test]
fn interval_keys_address_the_catalog() {
    let axis = second_scale_axis();

    let by_key = axis
        .ticks_for_key("15 minutes", 0.0, 1800.0)
        .expect("known key");
    let by_value = axis
        .ticks_for(TickInterval::Minutes15, 0.0, 1800.0)
        .expect("valid query");
    assert_eq!(by_key, by_value);

    let unknown = axis.ticks_for_key("fortnight", 0.0, 1800.0);
    assert!(matches!(
        unknown,
        Err(TimelineError::UnsupportedInterval { key }) if key == "fortnight"
    ));
}

#[test]
fn malformed_ranges_surface_immediately() {
    let axis = second_scale_axis();
    let result = axis.ticks_for(TickInterval::Minute, 10.0, 5.0);
    assert!(matches!(result, Err(TimelineError::EmptyRange { .. })));
}

#[test]
fn configure_recalibrates_the_axis() {
    let mut axis = second_scale_axis();
    assert_eq!(axis.instant_at(3600.0), utc(2024, 1, 1, 1, 0, 0));

    axis.configure(utc(2030, 6, 1, 0, 0, 0), utc(2030, 6, 2, 0, 0, 0))
        .expect("valid recalibration");
    assert_eq!(axis.instant_at(1.0), utc(2030, 6, 2, 0, 0, 0));
    assert_eq!(axis.index_of(&utc(2030, 6, 1, 12, 0, 0)), 0.5);

    let degenerate = axis.configure(utc(2030, 6, 1, 0, 0, 0), utc(2030, 6, 1, 0, 0, 0));
    assert!(matches!(
        degenerate,
        Err(TimelineError::InvalidConfiguration { .. })
    ));
}

#[test]
fn set_timezone_rebinds_conversions() {
    let mut axis = second_scale_axis();
    axis.set_timezone(Some(chrono_tz::America::New_York))
        .expect("explicit zone");

    assert_eq!(axis.timezone(), chrono_tz::America::New_York);
    let instant = axis.instant_at(0.0);
    assert_eq!(instant, utc(2024, 1, 1, 0, 0, 0), "the instant is unchanged");
    assert_eq!(
        instant.offset().fix().local_minus_utc(),
        -18_000,
        "but it now renders in Eastern time"
    );
}

#[test]
fn nearest_tick_snaps_an_index_to_the_grid() {
    let axis = second_scale_axis();

    let below = axis
        .nearest_tick(TickInterval::Minutes15, 950.0)
        .expect("finite index");
    assert_eq!(below.index, 900.0);

    let above = axis
        .nearest_tick(TickInterval::Minutes15, 1700.0)
        .expect("finite index");
    assert_eq!(above.index, 1800.0);

    let exact = axis
        .nearest_tick(TickInterval::Minutes15, 2700.0)
        .expect("finite index");
    assert_eq!(exact.index, 2700.0);

    let bad = axis.nearest_tick(TickInterval::Minutes15, f64::NAN);
    assert!(matches!(bad, Err(TimelineError::EmptyRange { .. })));
}

#[test]
fn configured_straddle_policy_applies_to_queries() {
    let axis_config = TimelineAxisConfig::from_calibration(
        Calibration::anchored(0.0, utc(2024, 1, 1, 0, 0, 0), 1.0).expect("valid calibration"),
    )
    .with_timezone(chrono_tz::UTC)
    .with_anchor_policy(AnchorPolicy::Straddle);
    let axis = TimelineAxis::new(axis_config).expect("valid axis");

    let marks = axis
        .ticks_for(TickInterval::Minutes15, 100.0, 1000.0)
        .expect("valid query");
    let indices: Vec<f64> = marks.iter().map(|mark| mark.index).collect();
    assert_eq!(indices, vec![0.0, 900.0, 1800.0]);
}

#[test]
fn index_range_for_centers_on_a_timeframe() {
    let axis = second_scale_axis();
    let (lo, hi) = axis.index_range_for(&utc(2024, 1, 1, 0, 30, 0), &utc(2024, 1, 1, 2, 30, 0));
    assert_eq!(lo, 1800.0);
    assert_eq!(hi, 9000.0);
}

#[test]
fn direction_follows_the_calibration_slope() {
    let axis = second_scale_axis();
    assert_eq!(axis.direction(), AxisDirection::Forward);

    let backward = TimelineAxisConfig::from_calibration(
        Calibration::two_point(
            0.0,
            utc(2024, 1, 1, 1, 0, 0),
            3600.0,
            utc(2024, 1, 1, 0, 0, 0),
        )
        .expect("valid calibration"),
    )
    .with_timezone(chrono_tz::UTC);
    let axis = TimelineAxis::new(backward).expect("valid axis");
    assert_eq!(axis.direction(), AxisDirection::Backward);
}

#[test]
fn config_round_trips_through_serde() {
    let config = TimelineAxisConfig::new(utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 1, 1, 0, 0))
        .expect("valid config")
        .with_timezone(chrono_tz::Europe::Berlin)
        .with_anchor_policy(AnchorPolicy::Straddle)
        .with_primary_interval(TickInterval::Minutes5);

    let json = serde_json::to_string(&config).expect("serialize config");
    let restored: TimelineAxisConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(restored, config);
}
