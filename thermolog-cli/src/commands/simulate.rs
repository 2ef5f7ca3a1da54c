use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use thermolog_core::constants::POS_SIGN;
use thermolog_core::encoder::FrameBuilder;
use thermolog_core::SENSOR_COUNT;
use tracing::info;

pub fn execute(output: &str, entries: usize, junk_prefix: usize, corrupt_every: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut capture = Vec::new();

    for _ in 0..junk_prefix {
        capture.push(rng.gen::<u8>());
    }

    let mut frame_count = 0usize;
    for _ in 0..entries {
        for sensor in 0..SENSOR_COUNT {
            // Plausible room temperatures in tenths of a degree
            let magnitude = rng.gen_range(150..350);
            let mut frame = FrameBuilder::new(sensor)
                .decimal_position(1)
                .magnitude(magnitude)
                .build()?;

            frame_count += 1;
            if corrupt_every > 0 && frame_count % corrupt_every == 0 {
                frame[POS_SIGN] = b'9';
            }

            capture.extend_from_slice(&frame);
        }
    }

    fs::write(output, &capture)
        .with_context(|| format!("Failed to write capture file: {}", output))?;

    info!("Wrote {} bytes to {}", capture.len(), output);
    println!(
        "Generated {} cycles ({} frames, {} junk bytes) into {}",
        entries, frame_count, junk_prefix, output
    );

    Ok(())
}
