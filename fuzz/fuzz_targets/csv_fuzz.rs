#![no_main]
use libfuzzer_sys::fuzz_target;
use spcfile::io::{self, CsvOptions};

fuzz_target!(|data: &[u8]| {
    // Whatever parses as a spectrum must survive a write/read cycle.
    let Ok(spectrum) = io::read_csv_from(data) else {
        return;
    };
    let mut out = Vec::new();
    io::write_csv_to(&mut out, &spectrum, &CsvOptions::default()).unwrap();
    let again = io::read_csv_from(out.as_slice()).unwrap();
    assert_eq!(again.len(), spectrum.len());
});
