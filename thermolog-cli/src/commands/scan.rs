use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use thermolog_core::{replay_capture, SENSOR_COUNT};
use tracing::info;

#[derive(Serialize, Deserialize)]
struct DecodedEntry {
    timestamp: String,
    values: [f64; SENSOR_COUNT],
}

pub fn execute(input: &str, output: Option<&str>, stats_only: bool) -> Result<()> {
    info!("Scanning capture: {}", input);

    let data = fs::read(input)
        .with_context(|| format!("Failed to read capture file: {}", input))?;

    info!("Capture size: {} bytes", data.len());

    let (entries, stats) = replay_capture(&data)?;

    println!("\n=== Scan Results ===");
    println!("Bytes scanned:       {} bytes", data.len());
    println!("Frames decoded:      {}", stats.frames_decoded);
    println!(
        "Format mismatches:   {}",
        if stats.format_mismatches > 0 {
            stats.format_mismatches.to_string().yellow()
        } else {
            stats.format_mismatches.to_string().normal()
        }
    );
    println!(
        "Field-value errors:  {}",
        if stats.field_value_errors > 0 {
            stats.field_value_errors.to_string().yellow()
        } else {
            stats.field_value_errors.to_string().normal()
        }
    );
    println!("Bytes resynced:      {}", stats.bytes_discarded);
    println!("Entries discarded:   {}", stats.entries_discarded);
    println!("Entries decoded:     {}", stats.entries_emitted.to_string().green());
    println!();

    if stats_only {
        return Ok(());
    }

    let decoded: Vec<DecodedEntry> = entries
        .iter()
        .map(|entry| DecodedEntry {
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            values: entry.values,
        })
        .collect();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&decoded)
            .with_context(|| "Failed to serialize decoded entries")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded entries written to: {}", output_path);
    } else {
        println!("=== Decoded Entries ===");
        for entry in &decoded {
            println!("{}  {:?}", entry.timestamp, entry.values);
        }
    }

    Ok(())
}
