//! Fuzz target: `SystemConfig::from_json`
//!
//! Arbitrary text must never panic the parser, and anything it accepts
//! must pass validation again.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use wellpump::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.filter_alpha > 0.0 && config.filter_alpha <= 1.0);
        assert!(config.samples_per_rms > 0);
    }
});
