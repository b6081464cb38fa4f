#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the pending-results payload decoder.
///
/// Whatever the scanner prints on stdout must either decode or produce an
/// error, and a decoded report must always render.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(report) = oss_hooks::present::parse_pending(s)
    {
        let path = std::path::Path::new(".scanoss/results.json");
        let _ = oss_hooks::present::render_pending(&report, path, path, false);
    }
});
