#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_combinator::Datetime;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(dt) = Datetime::parse(text) else {
        return;
    };
    // The normalized form parses back to itself.
    let out = Datetime::parse(dt.as_str()).unwrap();
    assert_eq!(dt, out);
    assert_eq!(dt.kind(), out.kind());
});
