#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are both fine; panics are not.
    if let Ok(cfg) = trail_config::load_toml(data)
        && cfg.validate().is_ok()
    {
        // A config that validates must also build a recorder.
        let rec = trail_core::RecorderCfg::from(&cfg.recorder);
        let fit = trail_core::FitCfg::from(&cfg.fit);
        assert!(
            trail_core::Recorder::builder()
                .with_recorder_cfg(rec)
                .with_fit_cfg(fit)
                .build()
                .is_ok()
        );
    }
    // The events parser shares the input and must not panic either.
    let _ = trail_config::parse_events_jsonl(data);
});
