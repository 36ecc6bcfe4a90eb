#![no_main]
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;
use trail_core::{MotionEvent, Recorder, RecorderCfg, TrailError};

#[derive(Debug, Arbitrary)]
struct Input {
    idle_ms: u8,
    extra_ms: u8,
    events: Vec<(i64, f64, f64)>,
    queries: Vec<i64>,
}

fuzz_target!(|input: Input| {
    let idle = u64::from(input.idle_ms.max(1));
    let cfg = RecorderCfg {
        idle_ms: idle,
        max_stroke_ms: idle + u64::from(input.extra_ms),
    };
    let Ok(mut rec) = Recorder::builder().with_recorder_cfg(cfg).build() else {
        return;
    };
    rec.start();
    for &(t, x, y) in &input.events {
        rec.feed(&MotionEvent::at(t, x, y));
    }
    rec.stop();
    let Ok(track) = rec.into_track() else {
        return;
    };

    for pair in track.as_slice().windows(2) {
        assert!(pair[0].end().t <= pair[1].start().t);
    }
    for &q in &input.queries {
        match track.locate(q) {
            Ok(l) => assert!(l.index < track.len() && (0.0..=1.0).contains(&l.progress)),
            Err(e) => assert!(track.is_empty() && e == TrailError::NoData),
        }
    }
});
