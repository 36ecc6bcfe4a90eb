use trail_core::{MotionEvent, Recorder, Track};

fn sample_track() -> Track {
    let mut r = Recorder::builder().build().unwrap();
    r.start();
    let pts = [
        (1_000, 0.1, 0.2),
        (1_007, 3.3, 1.0 / 3.0),
        (1_019, 7.77, 2.0_f64.sqrt()),
        (1_031, 12.0, 4.0),
        (1_200, 50.0, 50.0),
        (1_216, 51.5, 49.25),
    ];
    for (t, x, y) in pts {
        r.feed(&MotionEvent::at(t, x, y));
    }
    r.stop();
    r.into_track().unwrap()
}

#[test]
fn json_round_trip_is_lossless() {
    let track = sample_track();
    assert_eq!(track.len(), 2);
    let json = serde_json::to_string(&track).unwrap();
    let back: Track = serde_json::from_str(&json).unwrap();
    assert_eq!(back, track);
    for t in [999, 1_000, 1_013, 1_031, 1_100, 1_210, 2_000] {
        assert_eq!(back.locate(t).unwrap(), track.locate(t).unwrap());
    }
}

#[test]
fn json_keeps_all_segment_fields() {
    let json = serde_json::to_value(sample_track()).unwrap();
    let first = &json[0];
    for key in ["start", "end", "control1", "control2"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    for key in ["x", "y", "t", "tangent"] {
        assert!(first["start"].get(key).is_some(), "missing start.{key}");
    }
}

#[test]
fn overlapping_json_is_rejected() {
    let track = sample_track();
    let mut segs: Vec<serde_json::Value> =
        serde_json::from_value(serde_json::to_value(&track).unwrap()).unwrap();
    segs.swap(0, 1);
    let text = serde_json::to_string(&segs).unwrap();
    assert!(serde_json::from_str::<Track>(&text).is_err());
}
