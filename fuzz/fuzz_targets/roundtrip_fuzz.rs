#![no_main]
use libfuzzer_sys::fuzz_target;
use spcfile::spc::{self, SpcFile};

fuzz_target!(|data: &[u8]| {
    // Pairs of 4-byte words become (x, y) samples, NaNs included.
    let words: Vec<f32> = data
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let n = words.len() / 2;
    let (x, y) = (words[..n].to_vec(), words[n..2 * n].to_vec());

    let file = SpcFile::from_xy(x.clone(), y.clone()).unwrap();
    let bytes = spc::encode(&file).unwrap();
    let decoded = spc::decode(&bytes).unwrap();

    let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(decoded.spectrum.x()), bits(&x));
    assert_eq!(bits(decoded.spectrum.y()), bits(&y));
});
