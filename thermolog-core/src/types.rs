//! Core types for readings and accumulated entries

use crate::constants::{Unit, SENSOR_COUNT};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One decoded sensor reading
///
/// Ephemeral: produced per frame and consumed by the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sensor index, 0-based and always below [`SENSOR_COUNT`]
    pub sensor: usize,

    /// Temperature value with sign and decimal point applied
    pub value: f64,

    /// Unit the device reported; validated but not interpreted
    pub unit: Unit,
}

/// One complete log entry: a timestamp plus one value per sensor
///
/// Values default to 0.0 until overwritten by a decoded reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Instant this entry began accumulating
    pub timestamp: DateTime<Local>,

    /// Temperature values in sensor-index order
    pub values: [f64; SENSOR_COUNT],
}

impl Entry {
    /// Create an empty entry stamped now
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Create an empty entry with an explicit timestamp
    pub fn at(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            values: [0.0; SENSOR_COUNT],
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates readings into the in-flight [`Entry`]
///
/// An entry is complete exactly when every sensor index has received at
/// least one write since the entry was created. A repeated reading for the
/// same sensor before completion overwrites the earlier value; this is
/// accepted behavior, not an error.
#[derive(Debug, Clone)]
pub struct Accumulator {
    entry: Entry,
    seen: u8,
}

/// Bitmask with one bit per sensor slot
const ALL_SEEN: u8 = (1 << SENSOR_COUNT) - 1;

impl Accumulator {
    /// Create an accumulator with a fresh entry stamped now
    pub fn new() -> Self {
        Self {
            entry: Entry::new(),
            seen: 0,
        }
    }

    /// Write a reading into its slot; returns true iff the entry is now
    /// complete
    ///
    /// # Panics
    ///
    /// Never panics for readings produced by the decoder: `reading.sensor`
    /// is always below [`SENSOR_COUNT`].
    pub fn apply(&mut self, reading: &Reading) -> bool {
        self.entry.values[reading.sensor] = reading.value;
        self.seen |= 1 << reading.sensor;
        self.seen == ALL_SEEN
    }

    /// Whether the in-flight entry has a write for every sensor
    pub fn is_complete(&self) -> bool {
        self.seen == ALL_SEEN
    }

    /// Hand off the accumulated entry and start a fresh one stamped now
    pub fn take(&mut self) -> Entry {
        self.seen = 0;
        core::mem::replace(&mut self.entry, Entry::new())
    }

    /// Peek at the in-flight entry
    pub fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(sensor: usize, value: f64) -> Reading {
        Reading {
            sensor,
            value,
            unit: Unit::Celsius,
        }
    }

    #[test]
    fn test_completes_on_fourth_distinct_sensor() {
        let mut acc = Accumulator::new();
        assert!(!acc.apply(&reading(0, 20.0)));
        assert!(!acc.apply(&reading(1, 21.0)));
        assert!(!acc.apply(&reading(2, 22.0)));
        assert!(acc.apply(&reading(3, 23.0)));

        let entry = acc.take();
        assert_eq!(entry.values, [20.0, 21.0, 22.0, 23.0]);
        assert!(!acc.is_complete());
    }

    #[test]
    fn test_repeat_sensor_overwrites_without_completing() {
        let mut acc = Accumulator::new();
        assert!(!acc.apply(&reading(2, 10.0)));
        assert!(!acc.apply(&reading(2, 11.5)));
        assert!(!acc.apply(&reading(2, 12.0)));
        assert!(!acc.is_complete());
        assert_eq!(acc.entry().values[2], 12.0);
    }

    #[test]
    fn test_take_resets_progress() {
        let mut acc = Accumulator::new();
        for i in 0..SENSOR_COUNT {
            acc.apply(&reading(i, i as f64));
        }
        let first = acc.take();
        assert!(first.timestamp <= Local::now());

        // The fresh entry starts empty again
        assert!(!acc.apply(&reading(0, 1.0)));
        assert_eq!(acc.entry().values[1], 0.0);
    }
}
