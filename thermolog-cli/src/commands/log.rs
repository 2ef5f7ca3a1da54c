use anyhow::{Context, Result};
use std::fs::File;
use std::time::Duration;
use thermolog_core::{CsvSink, LoggerConfig, ReadSource, StreamReader};
use tracing::info;

pub fn execute(device: &str, output: &str, poll_ms: u64, settle_ms: u64) -> Result<()> {
    info!("Logging from {} into {}", device, output);

    let file = File::open(device)
        .with_context(|| format!("Failed to open device: {}", device))?;

    let config = LoggerConfig {
        poll_interval: Duration::from_millis(poll_ms),
        settle_delay: Duration::from_millis(settle_ms),
    };

    let reader = StreamReader::new(ReadSource::new(file), CsvSink::new(output), config);

    // Runs until the device stream closes; decode failures are recovered
    // inside the loop and only counted here.
    let (stats, _sink) = reader.run()?;

    println!("\n=== Logging Finished ===");
    println!("Frames decoded:      {}", stats.frames_decoded);
    println!("Format mismatches:   {}", stats.format_mismatches);
    println!("Field-value errors:  {}", stats.field_value_errors);
    println!("Bytes resynced:      {}", stats.bytes_discarded);
    println!("Entries emitted:     {}", stats.entries_emitted);

    Ok(())
}
