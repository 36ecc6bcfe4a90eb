//! Live capture with a real-time finalize timer.
//!
//! A host loop that feeds events as they arrive and polls the recorder between
//! them, so the idle timer closes strokes without waiting for the next event.
//!
//! Run with `cargo run -p trail_core --example live_capture`.

use std::time::Duration;

use trail_core::{DeadlineTimer, MotionEvent, Recorder};
use trail_traits::clock::{Clock, MonotonicClock};

fn main() -> Result<(), eyre::Report> {
    let clock = MonotonicClock::new();
    let epoch = clock.now();
    let mut rec = Recorder::builder()
        .with_timer(DeadlineTimer::new(clock))
        .build()?;
    rec.start();

    // (delay before event, dx, dy): a flick, a pause, then a second flick.
    let script = [
        (0, 0.0, 0.0),
        (10, 4.0, 1.0),
        (10, 5.0, 2.0),
        (10, 6.0, 2.0),
        (120, 0.0, 0.0),
        (10, -3.0, 4.0),
        (10, -3.0, 5.0),
    ];
    let (mut x, mut y) = (0.0, 0.0);
    for (delay_ms, dx, dy) in script {
        // Poll while waiting so the timer can fire during the pause.
        let wake = clock.now() + Duration::from_millis(delay_ms);
        while clock.now() < wake {
            if let Some(outcome) = rec.poll() {
                println!("timer: {outcome:?}");
            }
            clock.sleep(Duration::from_millis(2));
        }
        x += dx;
        y += dy;
        let t = i64::try_from(clock.ms_since(epoch))?;
        let ev = MotionEvent { t, x, y, dx, dy };
        println!("t={t:>4} -> {:?}", rec.feed(&ev));
    }
    rec.stop();

    let store = rec.segments()?;
    for (i, seg) in store.iter().enumerate() {
        println!(
            "segment {i}: [{}, {}) ms, chord {:.2}",
            seg.start().t,
            seg.end().t,
            seg.chord_length()
        );
    }
    Ok(())
}
