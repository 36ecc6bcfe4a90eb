#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Pointer-trajectory recording and playback (no I/O).
//!
//! Motion events are segmented into strokes, each stroke is fitted to one cubic
//! Bézier segment, and the resulting ordered track answers time-to-position
//! queries.
//!
//! ## Architecture
//!
//! - **Samples**: `MotionEvent` in, immutable `Sample` buffered (`sample` module)
//! - **Segmentation**: idle-gap, max-duration and finalize-timer rules (`Recorder`)
//! - **Fitting**: tangent-based cubic through the stroke endpoints (`fitter`)
//! - **Storage**: checked append-only `SegmentStore`, frozen into a shared `Track`
//! - **Lookup**: binary search with gap-hold and clamping (`locator`)
//! - **Playback**: scrub mapping and fixed-rate frames (`playback`)
//!
//! Timing is injected through `trail_traits::Timer`; the recorder never spawns
//! threads and never sleeps. Hosts call `Recorder::poll()` to let an expired
//! finalize timer close the open stroke.
//!
//! ```
//! use trail_core::{MotionEvent, Recorder};
//!
//! let mut rec = Recorder::builder().build()?;
//! rec.start();
//! for (t, x) in [(0, 0.0), (10, 5.0), (20, 10.0)] {
//!     rec.feed(&MotionEvent::at(t, x, 0.0));
//! }
//! rec.stop();
//! let track = rec.into_track()?;
//! let at = track.locate(20)?;
//! assert_eq!(at.position.x, 10.0);
//! # Ok::<(), eyre::Report>(())
//! ```

pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod fitter;
pub mod geometry;
pub mod locator;
pub mod mocks;
pub mod playback;
pub mod recorder;
pub mod sample;
pub mod segment;
pub mod status;
pub mod store;
pub mod timer;
pub mod util;

pub use builder::RecorderBuilder;
pub use config::{FitCfg, PlaybackCfg, RecorderCfg};
pub use error::{BuildError, Result, TrailError};
pub use fitter::fit_stroke;
pub use geometry::Point;
pub use locator::{Located, Locator, locate_in};
pub use mocks::NoopTimer;
pub use playback::{Frames, ScrubMap};
pub use recorder::{Recorder, RecorderStats};
pub use sample::{MotionEvent, Sample};
pub use segment::{Anchor, CurveSegment};
pub use status::{FeedStatus, FinalizeOutcome};
pub use store::{SegmentStore, Track};
pub use timer::DeadlineTimer;
