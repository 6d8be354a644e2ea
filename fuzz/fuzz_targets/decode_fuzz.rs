#![no_main]
use libfuzzer_sys::fuzz_target;
use spcfile::spc::{self, DecodeOptions, HEADER_SIZE};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors, never a panic.
    let _ = spc::decode(data);
    let _ = spc::decode_with_options(
        data,
        &DecodeOptions {
            read_log_header: false,
        },
    );

    // Anything that decodes must re-encode.
    if data.len() >= HEADER_SIZE
        && let Ok(file) = spc::decode(data)
    {
        assert!(spc::encode(&file).is_ok());
    }
});
