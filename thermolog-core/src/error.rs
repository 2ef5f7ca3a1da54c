//! Error types for thermolog operations

use crate::constants::FRAME_LEN;

/// A field of the frame grammar that carries a constrained digit value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    /// Display (sensor number) digit at byte 1, valid `1`..`4`
    Display,
    /// Unit code digit at byte 3, valid `1`..`2`
    Unit,
    /// Sign code digit at byte 4, valid `0`..`1`
    Sign,
    /// Decimal-position digit at byte 5, valid `0`..`3`
    DecimalPosition,
}

impl core::fmt::Display for FrameField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FrameField::Display => "display",
            FrameField::Unit => "unit",
            FrameField::Sign => "sign",
            FrameField::DecimalPosition => "decimal position",
        };
        f.write_str(name)
    }
}

/// Decode failures, tagged by the recovery strategy they demand
///
/// The two kinds are deliberately distinct: a [`FormatMismatch`] means the
/// stream has drifted off frame boundaries and the reader must resynchronize
/// byte-at-a-time, while a [`FieldValue`] means a single well-shaped frame
/// carried a corrupt field and should simply be dropped. Collapsing them
/// would silently change recovery behavior.
///
/// [`FormatMismatch`]: DecodeError::FormatMismatch
/// [`FieldValue`]: DecodeError::FieldValue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The byte block does not match the positional grammar (wrong literal
    /// bytes, non-digit in a digit field, or wrong length)
    #[error("frame does not match grammar: {}", FrameDisplay(frame))]
    FormatMismatch {
        /// The offending block, zero-padded if shorter than a frame
        frame: [u8; FRAME_LEN],
    },

    /// The block matches the grammar shape but a field digit is outside its
    /// valid set
    #[error("invalid {field} field value: {byte:?}", byte = *byte as char)]
    FieldValue {
        /// Which field held the invalid digit
        field: FrameField,
        /// The offending byte
        byte: u8,
    },
}

/// Renders frame bytes for diagnostics, escaping non-printing characters
struct FrameDisplay<'a>(&'a [u8]);

impl core::fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for &b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// Errors from the logger's I/O surfaces and the frame encoder
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error from the byte source or the sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error while appending an entry
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Magnitude does not fit the 8-digit field
    #[error("magnitude {0} exceeds maximum {max}", max = crate::constants::MAX_MAGNITUDE)]
    MagnitudeOverflow(u32),

    /// Sensor index outside the device's channel count
    #[error("sensor index {0} outside 0..{count}", count = crate::constants::SENSOR_COUNT)]
    SensorOutOfRange(usize),

    /// Decimal position outside the encodable range
    #[error("decimal position {0} exceeds maximum {max}", max = crate::constants::MAX_DECIMAL_POSITION)]
    DecimalPositionOutOfRange(u8),

    /// Value cannot be represented at the requested decimal position
    #[error("value {0} is not representable with decimal position {1}")]
    UnrepresentableValue(f64, u8),
}
