#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the vehicle document parser.
///
/// Arbitrary UTF-8 must either parse or produce an error, never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = autorank::pipeline::parse_vehicles_str(s);
    }
});
