//! Replay a synthetic device capture and print the recovered entries
//!
//! Run with: cargo run --example replay_capture

use thermolog_core::encoder::FrameBuilder;
use thermolog_core::{replay_capture, SENSOR_COUNT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a capture: three junk bytes (a mid-frame start), then a few
    // clean sensor cycles.
    let mut capture = vec![0x13, 0x37, 0x42];
    for cycle in 0..5u32 {
        for sensor in 0..SENSOR_COUNT {
            let frame = FrameBuilder::new(sensor)
                .decimal_position(1)
                .magnitude(215 + cycle + sensor as u32)
                .build()?;
            capture.extend_from_slice(&frame);
        }
    }

    let (entries, stats) = replay_capture(&capture)?;

    println!("=== Replay Results ===");
    println!("Frames decoded:    {}", stats.frames_decoded);
    println!("Format mismatches: {}", stats.format_mismatches);
    println!("Bytes discarded:   {}", stats.bytes_discarded);
    println!("Entries emitted:   {}", stats.entries_emitted);
    println!();

    for entry in &entries {
        println!(
            "{}  {:?}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.values
        );
    }

    Ok(())
}
