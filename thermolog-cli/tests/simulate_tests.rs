use std::fs;
use tempfile::tempdir;

use thermolog_cli::commands::{log, simulate};
use thermolog_core::{replay_capture, FRAME_LEN, SENSOR_COUNT};

#[test]
fn test_simulate_produces_decodable_capture() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("capture.bin");

    simulate::execute(capture.to_str().unwrap(), 8, 0, 0).unwrap();

    let data = fs::read(&capture).unwrap();
    assert_eq!(data.len(), 8 * SENSOR_COUNT * FRAME_LEN);

    let (entries, stats) = replay_capture(&data).unwrap();
    assert_eq!(stats.format_mismatches, 0);
    assert_eq!(stats.entries_discarded, 1);
    assert_eq!(entries.len(), 7);
}

#[test]
fn test_simulate_junk_prefix_forces_resync() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("capture.bin");

    simulate::execute(capture.to_str().unwrap(), 8, 5, 0).unwrap();

    let data = fs::read(&capture).unwrap();
    let (_, stats) = replay_capture(&data).unwrap();
    assert!(stats.format_mismatches >= 1);
    assert!(stats.bytes_discarded >= 1);
}

#[test]
fn test_simulate_corruption_is_dropped_not_fatal() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("capture.bin");

    simulate::execute(capture.to_str().unwrap(), 10, 0, 7).unwrap();

    let data = fs::read(&capture).unwrap();
    let (_, stats) = replay_capture(&data).unwrap();
    assert!(stats.field_value_errors >= 1);
}

#[test]
fn test_log_from_capture_file_writes_csv() {
    let dir = tempdir().unwrap();
    let capture = dir.path().join("capture.bin");
    let csv = dir.path().join("log.csv");

    simulate::execute(capture.to_str().unwrap(), 4, 0, 0).unwrap();
    log::execute(capture.to_str().unwrap(), csv.to_str().unwrap(), 0, 0).unwrap();

    let contents = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // Header plus one row per non-discarded entry
    assert_eq!(lines[0], "Date,Sensor1,Sensor2,Sensor3,Sensor4");
    assert_eq!(lines.len(), 1 + 3);
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 1 + SENSOR_COUNT);
    }
}
