//! Constants and field layout for the device frame format

use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Frame size on the wire, in bytes
pub const FRAME_LEN: usize = 16;

/// Number of sensor channels reported by the device
pub const SENSOR_COUNT: usize = 4;

/// Literal marker expected at the start of every frame (ASCII `4`)
pub const START_MARKER: u8 = b'4';

/// Literal marker expected between the display and unit fields (ASCII `0`)
pub const MID_MARKER: u8 = b'0';

/// Byte offset of the start marker
pub const POS_START_MARKER: usize = 0;

/// Byte offset of the display (sensor number) digit, one of `1`..`4`
pub const POS_DISPLAY: usize = 1;

/// Byte offset of the mid marker
pub const POS_MID_MARKER: usize = 2;

/// Byte offset of the unit code digit, `1` (Celsius) or `2` (Fahrenheit)
pub const POS_UNIT: usize = 3;

/// Byte offset of the sign code digit, `0` (positive) or `1` (negative)
pub const POS_SIGN: usize = 4;

/// Byte offset of the decimal-position digit, `0`..`3`
pub const POS_DECIMAL: usize = 5;

/// Byte range of the 8-digit unsigned magnitude
pub const MAGNITUDE_RANGE: core::ops::Range<usize> = 6..14;

/// Number of digits in the magnitude field
pub const MAGNITUDE_DIGITS: usize = 8;

/// Largest magnitude representable in the 8-digit field
pub const MAX_MAGNITUDE: u32 = 99_999_999;

/// Highest valid decimal-position digit
pub const MAX_DECIMAL_POSITION: u8 = 3;

/// Bytes 14..16 are the device's frame terminator; the grammar does not
/// constrain them and the decoder ignores their content.
pub const TERMINATOR: &[u8; 2] = b"\r\n";

/// Default interval between availability polls (and post-entry pacing)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default settling delay before the single-byte resynchronization discard
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Temperature unit encoded in a frame's unit field
///
/// Validated during decoding but not otherwise interpreted; the logger
/// records values exactly as the device reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Unit code `1`
    Celsius,
    /// Unit code `2`
    Fahrenheit,
}

impl Unit {
    /// Parse a unit from its wire digit, if valid
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'1' => Some(Unit::Celsius),
            b'2' => Some(Unit::Fahrenheit),
            _ => None,
        }
    }

    /// Wire digit for this unit
    pub const fn code(&self) -> u8 {
        match self {
            Unit::Celsius => b'1',
            Unit::Fahrenheit => b'2',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_layout_covers_frame() {
        assert_eq!(MAGNITUDE_RANGE.end + TERMINATOR.len(), FRAME_LEN);
        assert_eq!(MAGNITUDE_RANGE.len(), MAGNITUDE_DIGITS);
    }

    #[test]
    fn test_unit_codes_round_trip() {
        for unit in [Unit::Celsius, Unit::Fahrenheit] {
            assert_eq!(Unit::from_code(unit.code()), Some(unit));
        }
        assert_eq!(Unit::from_code(b'3'), None);
        assert_eq!(Unit::from_code(b'0'), None);
    }
}
