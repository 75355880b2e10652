use gapfill_rs::value::MissingLabel;
use gapfill_rs::{Series, Value, fill_missing};

fn reading(value: Option<f64>, missing: &mut u32) -> Value {
    value.map_or_else(
        || {
            *missing += 1;
            Value::Missing(MissingLabel::new(format!("Missing_{missing}")))
        },
        Value::Present,
    )
}

fn build_series(values: &[Option<f64>]) -> Series {
    let mut series = Series::new();
    let mut missing = 0u32;
    for (position, value) in values.iter().enumerate() {
        let value = reading(*value, &mut missing);
        series.push(format!("2023-01-{:02} 12:00", position + 1), value);
    }
    series
}

#[test]
fn symmetric_gap_yields_weighted_interpolation() {
    let mut series = build_series(&[Some(25.5), None, Some(26.0), Some(27.5)]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    assert_eq!(resolutions.value_of("Missing_1"), Some(25.75));
}

#[test]
fn resolution_order_matches_first_seen_scan() {
    let mut series = build_series(&[None, Some(20.0), None, Some(24.0), None]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    let labels: Vec<&str> = resolutions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Missing_1", "Missing_2", "Missing_3"]);
    let indices: Vec<usize> = resolutions.iter().map(|r| r.index).collect();
    assert_eq!(indices, [0, 2, 4]);
}

#[test]
fn consecutive_gaps_interpolate_from_original_anchors() {
    // A cascading forward-fill would resolve Missing_2 from the already
    // filled Missing_1; the correct anchors are the original 10.0 and 20.0.
    let mut series = build_series(&[Some(10.0), None, None, Some(20.0)]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    let first = resolutions.value_of("Missing_1").expect("first gap");
    let second = resolutions.value_of("Missing_2").expect("second gap");
    assert!((first - (10.0 + 10.0 / 3.0)).abs() < 1e-12);
    assert!((second - (10.0 + 20.0 / 3.0)).abs() < 1e-12);
    assert_eq!(format!("{first:.6}"), "13.333333");
    assert_eq!(format!("{second:.6}"), "16.666667");
}

#[test]
fn gap_resolution_is_order_independent() {
    // Every expected value below is derived purely from originally present
    // anchors, so a pass in any resolution order must reproduce them.
    let mut series = build_series(&[Some(20.0), None, None, Some(24.0), None, Some(30.0)]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    let expected = [
        ("Missing_1", 20.0 + 4.0 / 3.0),
        ("Missing_2", 20.0 + 8.0 / 3.0),
        ("Missing_3", 27.0),
    ];
    for (label, value) in expected {
        let resolved = resolutions.value_of(label).expect("resolved label");
        assert!(
            (resolved - value).abs() < 1e-12,
            "{label} resolved to {resolved}, expected {value}"
        );
    }
}

#[test]
fn single_present_value_anchors_everything() {
    let mut series = build_series(&[None, None, Some(26.5), None]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    for label in ["Missing_1", "Missing_2", "Missing_3"] {
        assert_eq!(resolutions.value_of(label), Some(26.5));
    }
}

#[test]
fn fully_present_series_returns_empty_resolutions() {
    let mut series = build_series(&[Some(1.0), Some(2.0), Some(3.0)]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    assert!(resolutions.is_empty());
    assert_eq!(resolutions.len(), 0);
}

#[test]
fn unknown_label_lookup_returns_none() {
    let mut series = build_series(&[Some(1.0), None, Some(3.0)]);
    let resolutions = fill_missing(&mut series).expect("fill series");
    assert_eq!(resolutions.value_of("Missing_9"), None);
}

#[test]
fn mercury_sample_resolves_all_gaps() {
    let values = [
        Some(26.4),
        None,
        Some(27.0),
        Some(28.5),
        None,
        Some(30.2),
        Some(31.4),
        None,
        Some(30.8),
        Some(29.7),
        None,
        Some(28.1),
        Some(26.9),
        None,
        Some(25.4),
    ];
    let mut series = build_series(&values);
    let resolutions = fill_missing(&mut series).expect("fill series");
    let rendered: Vec<String> = resolutions
        .iter()
        .map(|r| format!("{}: {:.6}", r.label, r.value))
        .collect();
    assert_eq!(
        rendered,
        [
            "Missing_1: 26.700000",
            "Missing_2: 29.350000",
            "Missing_3: 31.100000",
            "Missing_4: 28.900000",
            "Missing_5: 26.150000",
        ]
    );
    assert!(series.readings().iter().all(|r| !r.value.is_missing()));
}
