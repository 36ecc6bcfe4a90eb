//! Human-readable error descriptions and structured JSON error formatting.

use trail_core::error::{BuildError, TrailError};

use crate::record::InputError;

/// Exit code for an empty track (nothing to locate or play back).
pub const EXIT_NO_DATA: i32 = 3;
/// Exit code for bad input files or configuration.
pub const EXIT_INVALID_INPUT: i32 = 4;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ie) = err.downcast_ref::<InputError>() {
        let cause = err
            .chain()
            .nth(1)
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        return match ie {
            InputError::Events(path) => format!(
                "What happened: Could not read motion events from {path}{cause}.\nLikely causes: Wrong headers (expected 't,x,y' or 't,x,y,dx,dy'), a malformed row, or an unsupported extension.\nHow to fix: Provide a .csv or .jsonl file with integer millisecond timestamps and numeric positions."
            ),
            InputError::Config(path) => format!(
                "What happened: Invalid configuration in {path}{cause}.\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file (see etc/trail.toml for a sample), then rerun."
            ),
        };
    }

    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid recorder configuration ({msg}).\nLikely causes: Out-of-range [recorder] or [fit] values.\nHow to fix: Edit the config file, then rerun."
        );
    }

    if let Some(te) = err.downcast_ref::<TrailError>() {
        return match te {
            TrailError::NoData => "What happened: The track has no segments.\nLikely causes: The events file is empty, or every stroke had fewer than two samples.\nHow to fix: Record longer strokes, or lower recorder.idle_ms if samples arrive sparsely.".to_string(),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.chain().nth(1) {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 for no data, 4 for invalid input, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if matches!(err.downcast_ref::<TrailError>(), Some(TrailError::NoData)) {
        return EXIT_NO_DATA;
    }
    if err.downcast_ref::<InputError>().is_some() || err.downcast_ref::<BuildError>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    1
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(ie) = err.downcast_ref::<InputError>() {
        return match ie {
            InputError::Events(_) => "InvalidEvents",
            InputError::Config(_) => "InvalidConfig",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    match err.downcast_ref::<TrailError>() {
        Some(TrailError::NoData) => "NoData",
        Some(TrailError::InvalidSample { .. }) => "InvalidSample",
        Some(TrailError::DegenerateStroke { .. }) => "DegenerateStroke",
        Some(TrailError::ZeroDurationSegment { .. }) => "ZeroDurationSegment",
        Some(TrailError::Overlap { .. }) => "Overlap",
        Some(TrailError::State(_)) => "State",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
