//! Stream reader loop: framing, resynchronization, entry accumulation

use crate::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY, FRAME_LEN};
use crate::decoder::decode_frame;
use crate::error::{DecodeError, Error};
use crate::sink::{EntrySink, VecSink};
use crate::source::{ByteSource, MemorySource};
use crate::types::{Accumulator, Entry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "logging")]
use tracing::{debug, info, warn};

/// Timing configuration for the reader loop
///
/// Frame length and sensor count are fixed properties of the device and
/// live in [`crate::constants`]; only the two delays are tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Sleep between availability polls, and pacing after each completed
    /// entry
    pub poll_interval: Duration,

    /// Settling delay before the single-byte resynchronization discard, so
    /// the source has a chance to buffer at least one byte
    pub settle_delay: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl LoggerConfig {
    /// Zero-delay configuration for replaying captures
    pub fn immediate() -> Self {
        Self {
            poll_interval: Duration::ZERO,
            settle_delay: Duration::ZERO,
        }
    }
}

/// Counters for one reader run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames decoded successfully
    pub frames_decoded: usize,

    /// Format mismatches (stream misalignment events)
    pub format_mismatches: usize,

    /// Field-value errors (corrupt-but-shaped frames dropped)
    pub field_value_errors: usize,

    /// Bytes discarded by resynchronization
    pub bytes_discarded: usize,

    /// Entries handed to the sink
    pub entries_emitted: usize,

    /// Entries discarded (the run's first completion)
    pub entries_discarded: usize,
}

/// Outcome of one wait on the byte source
enum Wait {
    Ready,
    Closed,
    Cancelled,
}

/// The blocking reader loop
///
/// Pulls [`FRAME_LEN`]-byte blocks from the source, decodes them, recovers
/// from misalignment byte-at-a-time, accumulates readings into entries, and
/// hands completed entries to the sink. The very first completed entry of a
/// run is discarded: the stream may have started mid-cycle and the entry
/// could hold stale or partial data.
///
/// Strictly sequential; decoding depends on stream position and frame
/// boundaries are positional, so bytes must reach the decoder in order.
pub struct StreamReader<S, K> {
    source: S,
    sink: K,
    config: LoggerConfig,
    accumulator: Accumulator,
    first_entry_pending: bool,
    cancel: Arc<AtomicBool>,
    stats: RunStats,
}

impl<S: ByteSource, K: EntrySink> StreamReader<S, K> {
    /// Create a reader over a source and sink with the given timing
    pub fn new(source: S, sink: K, config: LoggerConfig) -> Self {
        Self {
            source,
            sink,
            config,
            accumulator: Accumulator::new(),
            first_entry_pending: true,
            cancel: Arc::new(AtomicBool::new(false)),
            stats: RunStats::default(),
        }
    }

    /// Handle for requesting a graceful stop
    ///
    /// The flag is checked at the top of each cycle; a cycle in progress
    /// finishes normally.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run until the source closes (or cancellation is requested)
    ///
    /// Decode failures are recovered locally and never terminate the loop;
    /// only source exhaustion or a sink/source IO failure ends the run.
    pub fn run(mut self) -> Result<(RunStats, K), Error> {
        #[cfg(feature = "logging")]
        info!("starting reader loop");

        loop {
            match self.wait_for_bytes(FRAME_LEN)? {
                Wait::Ready => {}
                Wait::Closed | Wait::Cancelled => break,
            }

            let mut frame = [0u8; FRAME_LEN];
            let n = self.source.read_exact(&mut frame)?;
            if n < FRAME_LEN {
                // Source closed mid-frame
                break;
            }

            match decode_frame(&frame) {
                Ok(reading) => {
                    self.stats.frames_decoded += 1;
                    if self.accumulator.apply(&reading) {
                        self.finish_entry()?;
                        std::thread::sleep(self.config.poll_interval);
                    }
                }
                Err(e @ DecodeError::FormatMismatch { .. }) => {
                    #[cfg(feature = "logging")]
                    warn!("resynchronizing: {}", e);
                    #[cfg(not(feature = "logging"))]
                    let _ = e;

                    self.stats.format_mismatches += 1;
                    match self.resynchronize()? {
                        Wait::Ready => {}
                        Wait::Closed | Wait::Cancelled => break,
                    }
                }
                Err(e @ DecodeError::FieldValue { .. }) => {
                    #[cfg(feature = "logging")]
                    warn!("dropping frame: {}", e);
                    #[cfg(not(feature = "logging"))]
                    let _ = e;

                    self.stats.field_value_errors += 1;
                }
            }
        }

        #[cfg(feature = "logging")]
        info!(
            "reader loop finished: {} entries emitted, {} frames decoded",
            self.stats.entries_emitted, self.stats.frames_decoded
        );

        Ok((self.stats, self.sink))
    }

    /// Emit or discard the completed entry and start a fresh one
    fn finish_entry(&mut self) -> Result<(), Error> {
        let entry: Entry = self.accumulator.take();
        if self.first_entry_pending {
            // May have begun accumulating mid-stream; drop it unconditionally.
            self.first_entry_pending = false;
            self.stats.entries_discarded += 1;

            #[cfg(feature = "logging")]
            debug!("discarding first completed entry");
        } else {
            self.sink.append(&entry)?;
            self.stats.entries_emitted += 1;

            #[cfg(feature = "logging")]
            debug!("emitted entry {:?}", entry.values);
        }
        Ok(())
    }

    /// Discard exactly one byte so the next cycle re-attempts alignment
    ///
    /// Fixed-width framing with no delimiter means any byte-count
    /// disagreement offsets every subsequent read; dropping one byte at a
    /// time is the minimal correction and converges within at most
    /// [`FRAME_LEN`] retries. The settle delay gives the source a chance to
    /// buffer a byte so the discard never races an empty buffer.
    fn resynchronize(&mut self) -> Result<Wait, Error> {
        std::thread::sleep(self.config.settle_delay);

        match self.wait_for_bytes(1)? {
            Wait::Ready => {}
            other => return Ok(other),
        }

        let mut discard = [0u8; 1];
        let n = self.source.read_exact(&mut discard)?;
        if n == 0 {
            return Ok(Wait::Closed);
        }
        self.stats.bytes_discarded += 1;

        #[cfg(feature = "logging")]
        debug!("discarded byte {:#04x}", discard[0]);

        Ok(Wait::Ready)
    }

    /// Poll until `n` bytes are available, the source closes, or the run is
    /// cancelled; never consumes bytes
    fn wait_for_bytes(&mut self, n: usize) -> Result<Wait, Error> {
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Ok(Wait::Cancelled);
            }
            if self.source.bytes_available()? >= n {
                return Ok(Wait::Ready);
            }
            if !self.source.is_open() {
                return Ok(Wait::Closed);
            }
            std::thread::sleep(self.config.poll_interval);
        }
    }
}

/// Replay a captured byte run offline, with zero delays
///
/// Returns the entries that would have been emitted (first completion
/// discarded, as in a live run) and the run statistics.
pub fn replay_capture(data: &[u8]) -> Result<(Vec<Entry>, RunStats), Error> {
    let reader = StreamReader::new(
        MemorySource::new(data.to_vec()),
        VecSink::new(),
        LoggerConfig::immediate(),
    );
    let (stats, sink) = reader.run()?;
    Ok((sink.entries, stats))
}
