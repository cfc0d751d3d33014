#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(ts) = tallybook::core::parse_timestamp(s) {
            let _ = tallybook::core::due_date(ts, Some(14));
            let _ = tallybook::core::format_date(&ts);
        }
    }
});
