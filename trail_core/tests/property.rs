use proptest::prelude::*;
use trail_core::{MotionEvent, Recorder, RecorderCfg, Track, TrailError};

prop_compose! {
    // strictly increasing timestamps with gaps on both sides of the idle threshold
    fn events_strategy()(
        start in -10_000i64..10_000,
        steps in prop::collection::vec((1i64..120, -500.0f64..500.0, -500.0f64..500.0), 0..120),
    ) -> Vec<MotionEvent> {
        let mut t = start;
        let mut out = Vec::with_capacity(steps.len());
        for (gap, x, y) in steps {
            t += gap;
            out.push(MotionEvent::at(t, x, y));
        }
        out
    }
}

fn record(events: &[MotionEvent], cfg: RecorderCfg) -> Track {
    let mut r = Recorder::builder()
        .with_recorder_cfg(cfg)
        .build()
        .expect("valid config");
    r.start();
    for ev in events {
        r.feed(ev);
    }
    r.stop();
    r.into_track().expect("stopped")
}

proptest! {
    #[test]
    fn segments_never_overlap(events in events_strategy()) {
        let track = record(&events, RecorderCfg::default());
        for pair in track.as_slice().windows(2) {
            prop_assert!(pair[0].end().t <= pair[1].start().t);
        }
        for seg in &track {
            prop_assert!(seg.start().t < seg.end().t);
        }
    }

    #[test]
    fn endpoints_are_reproduced_exactly(events in events_strategy()) {
        let track = record(&events, RecorderCfg::default());
        for seg in &track {
            prop_assert_eq!(seg.position_at(seg.start().t), seg.start().position());
            prop_assert_eq!(seg.position_at(seg.end().t), seg.end().position());
        }
    }

    #[test]
    fn locate_is_total_once_non_empty(events in events_strategy(), q in any::<i64>()) {
        let track = record(&events, RecorderCfg::default());
        match track.locate(q) {
            Ok(l) => {
                prop_assert!(!track.is_empty());
                prop_assert!(l.index < track.len());
                prop_assert!((0.0..=1.0).contains(&l.progress));
                prop_assert!(l.position.is_finite());
            }
            Err(e) => {
                prop_assert!(track.is_empty());
                prop_assert_eq!(e, TrailError::NoData);
            }
        }
    }

    #[test]
    fn located_segment_contains_query_inside_a_segment(events in events_strategy()) {
        let track = record(&events, RecorderCfg::default());
        for (i, seg) in track.iter().enumerate() {
            let mid = seg.start().t + seg.duration_ms() / 2;
            let l = track.locate(mid).unwrap();
            prop_assert_eq!(l.index, i);
            prop_assert!(!l.held);
        }
    }

    #[test]
    fn strokes_respect_max_duration(events in events_strategy()) {
        let cfg = RecorderCfg::default();
        let track = record(&events, cfg);
        // a stroke closes on the first sample past the limit, so it can overrun by one gap
        for seg in &track {
            prop_assert!(seg.duration_ms() < cfg.max_stroke_ms as i64 + 120);
        }
    }
}
