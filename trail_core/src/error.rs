use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrailError {
    #[error("invalid sample at t={t}: {reason}")]
    InvalidSample { t: i64, reason: &'static str },
    #[error("degenerate stroke: {samples} sample(s), need at least 2")]
    DegenerateStroke { samples: usize },
    #[error("zero-duration segment at t={t}")]
    ZeroDurationSegment { t: i64 },
    #[error("no data: segment store is empty")]
    NoData,
    #[error("segment starting at t={start} overlaps previous segment ending at t={prev_end}")]
    Overlap { prev_end: i64, start: i64 },
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
