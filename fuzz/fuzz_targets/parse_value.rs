#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    match toml_combinator::parse(text) {
        Ok(mut table) => {
            std::hint::black_box(&mut table);
        }
        Err(err) => {
            assert!(err.span.start <= err.span.end);
            assert!(err.span.end as usize <= text.len());
        }
    }
});
