//! Fuzzing placeholder for thermolog-core decoding
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder

pub fn fuzz_decode(data: &[u8]) {
    use thermolog_core::decoder::decode_frame;

    // Try to decode - should never panic
    let _ = decode_frame(data);
}

pub fn fuzz_replay(data: &[u8]) {
    use thermolog_core::replay_capture;

    // Try to replay a whole capture - should never panic
    let _ = replay_capture(data);
}
