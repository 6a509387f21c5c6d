//! Fuzz target: JSON configuration loading
//!
//! Any document `SystemConfig::from_json_str` accepts must keep every
//! servo target inside the configured range.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use wastesort::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json_str(text) {
        let range = config.servo_range;
        for position in [
            config.bins.hazardous,
            config.bins.organic,
            config.bins.recyclable,
            config.vertical.up,
            config.vertical.down,
            config.neutral_position,
        ] {
            assert!(range.contains(position));
        }
        assert!(config.timing.poll_interval_ms > 0);
    }
});
