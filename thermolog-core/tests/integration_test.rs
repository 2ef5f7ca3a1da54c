//! Integration tests for the complete encode → corrupt → replay flow

use thermolog_core::constants::POS_SIGN;
use thermolog_core::encoder::FrameBuilder;
use thermolog_core::{replay_capture, Unit, FRAME_LEN, SENSOR_COUNT};

/// Encode one full sensor cycle, values in tenths of a degree
fn cycle(tenths: [u32; SENSOR_COUNT]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (sensor, magnitude) in tenths.iter().enumerate() {
        let frame = FrameBuilder::new(sensor)
            .unit(Unit::Celsius)
            .decimal_position(1)
            .magnitude(*magnitude)
            .build()
            .unwrap();
        bytes.extend_from_slice(&frame);
    }
    bytes
}

#[test]
fn test_full_workflow_clean() {
    let mut stream = Vec::new();
    stream.extend_from_slice(&cycle([201, 202, 203, 204]));
    stream.extend_from_slice(&cycle([211, 212, 213, 214]));
    stream.extend_from_slice(&cycle([221, 222, 223, 224]));

    let (entries, stats) = replay_capture(&stream).unwrap();

    assert_eq!(stats.frames_decoded, 3 * SENSOR_COUNT);
    assert_eq!(stats.format_mismatches, 0);
    assert_eq!(stats.field_value_errors, 0);

    // First completion discarded, rest emitted in order
    assert_eq!(stats.entries_discarded, 1);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].values, [21.1, 21.2, 21.3, 21.4]);
    assert_eq!(entries[1].values, [22.1, 22.2, 22.3, 22.4]);
}

#[test]
fn test_full_workflow_with_misalignment_and_corruption() {
    // Transport glitch: a single spurious byte between two clean cycles
    let mut stream = Vec::new();
    stream.extend_from_slice(&cycle([201, 202, 203, 204]));
    stream.extend_from_slice(&cycle([211, 212, 213, 214]));
    stream.push(0x00);
    for i in 0..5 {
        stream.extend_from_slice(&cycle([231 + i, 232 + i, 233 + i, 234 + i]));
    }

    // A corrupt-but-shaped frame right at the end
    let mut corrupt = FrameBuilder::new(0)
        .decimal_position(1)
        .magnitude(777)
        .build()
        .unwrap();
    corrupt[POS_SIGN] = b'5';
    stream.extend_from_slice(&corrupt);

    let (entries, stats) = replay_capture(&stream).unwrap();

    // The glitch costs at most one frame-length of discards to recover
    assert!(stats.format_mismatches >= 1);
    assert!(stats.bytes_discarded <= FRAME_LEN);
    assert_eq!(stats.field_value_errors, 1);

    // Entries before the glitch and after recovery both survive
    assert_eq!(entries[0].values, [21.1, 21.2, 21.3, 21.4]);
    assert!(entries.len() >= 3);
    for entry in entries {
        for value in entry.values {
            assert!((20.0..30.0).contains(&value));
        }
    }
}

#[test]
fn test_decimal_and_sign_reconstruction() {
    let mut stream = Vec::new();
    stream.extend_from_slice(&cycle([200, 200, 200, 200]));

    // Mixed signs and decimal positions in one cycle
    let mut second = Vec::new();
    second.extend_from_slice(
        &FrameBuilder::new(0)
            .decimal_position(2)
            .magnitude(12345)
            .build()
            .unwrap(),
    );
    second.extend_from_slice(
        &FrameBuilder::new(1)
            .decimal_position(2)
            .magnitude(12345)
            .negative()
            .build()
            .unwrap(),
    );
    second.extend_from_slice(
        &FrameBuilder::new(2)
            .decimal_position(0)
            .magnitude(42)
            .build()
            .unwrap(),
    );
    second.extend_from_slice(
        &FrameBuilder::new(3)
            .decimal_position(3)
            .magnitude(1500)
            .negative()
            .build()
            .unwrap(),
    );
    stream.extend_from_slice(&second);
    stream.extend_from_slice(&cycle([200, 200, 200, 200]));

    let (entries, _) = replay_capture(&stream).unwrap();
    assert_eq!(entries[0].values, [123.45, -123.45, 42.0, -1.5]);
}
