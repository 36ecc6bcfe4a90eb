//! Quick Start Example
//!
//! Records a short synthetic gesture, freezes the track and queries it the way
//! a playback collaborator would.
//!
//! Run with `cargo run -p trail_core --example quick_start`.

use trail_core::{Frames, Locator, MotionEvent, Recorder, ScrubMap};

fn main() -> Result<(), eyre::Report> {
    let mut rec = Recorder::builder().build()?;
    rec.start();

    // Two strokes separated by a 200 ms pause.
    let events = [
        (0, 0.0, 0.0),
        (8, 6.0, 2.0),
        (16, 14.0, 5.0),
        (24, 24.0, 6.0),
        (224, 24.0, 40.0),
        (232, 30.0, 52.0),
        (240, 34.0, 66.0),
    ];
    for (t, x, y) in events {
        let status = rec.feed(&MotionEvent::at(t, x, y));
        println!("t={t:>4} -> {status:?}");
    }
    rec.stop();

    let mut locator = Locator::default();
    locator.set_segments(rec.into_track()?)?;
    let Some(track) = locator.track() else {
        eyre::bail!("locator has no track");
    };
    println!("{} segment(s) over {} ms", track.len(), track.duration_ms());

    for t in [-10, 0, 12, 24, 100, 232, 500] {
        let l = locator.locate(t)?;
        println!(
            "t={t:>4} segment={} progress={:.3} held={} at ({:.2}, {:.2})",
            l.index, l.progress, l.held, l.position.x, l.position.y
        );
    }

    let scrub = ScrubMap::default();
    let (t, p) = scrub.position(track, 5_000.0)?;
    println!("scrub 5000 -> t={t} ({:.2}, {:.2})", p.x, p.y);

    let frames = Frames::new(track.clone(), 60)?.count();
    println!("{frames} frame(s) at 60 fps");
    Ok(())
}
