//! # Thermolog Core
//!
//! Decoding and durable logging for the byte stream of a four-channel
//! temperature measuring device. The device emits fixed-size 16-byte ASCII
//! frames, one per sensor, with no delimiters; frame boundaries are purely
//! positional, so the reader detects misalignment and recovers byte-at-a-time.
//!
//! ## Modules
//!
//! - `constants`: Frame format layout and tunable defaults
//! - `error`: Decode failure taxonomy and operational errors
//! - `types`: Readings, entries, and the entry accumulator
//! - `decoder`: Strict positional frame decoding
//! - `encoder`: Frame encoding (simulation and tests)
//! - `source`: Byte-source abstraction over the transport
//! - `sink`: Entry sinks (CSV persistence, in-memory collection)
//! - `reader`: The blocking reader loop with resynchronization

#![warn(missing_docs)]

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;
pub mod sink;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use constants::{Unit, FRAME_LEN, SENSOR_COUNT};
pub use error::{DecodeError, Error, FrameField};
pub use reader::{replay_capture, LoggerConfig, RunStats, StreamReader};
pub use sink::{CsvSink, EntrySink, VecSink};
pub use source::{ByteSource, MemorySource, ReadSource};
pub use types::{Accumulator, Entry, Reading};

/// Result type alias for thermolog operations
pub type Result<T> = core::result::Result<T, Error>;
