//! Frame decoding (fixed-width positional grammar)

use crate::constants::{
    Unit, FRAME_LEN, MAGNITUDE_RANGE, MAX_DECIMAL_POSITION, MID_MARKER, POS_DECIMAL, POS_DISPLAY,
    POS_MID_MARKER, POS_SIGN, POS_START_MARKER, POS_UNIT, SENSOR_COUNT, START_MARKER,
};
use crate::error::{DecodeError, FrameField};
use crate::types::Reading;

/// Decode one frame into a [`Reading`]
///
/// The grammar is a fixed-width positional field layout over ASCII digits:
///
/// | Byte  | Field            | Valid values          |
/// |-------|------------------|-----------------------|
/// | 0     | start marker     | literal `4`           |
/// | 1     | display number   | `1`..`4` (sensor + 1) |
/// | 2     | mid marker       | literal `0`           |
/// | 3     | unit code        | `1` (C) or `2` (F)    |
/// | 4     | sign code        | `0` (+) or `1` (-)    |
/// | 5     | decimal position | `0`..`3`              |
/// | 6..14 | magnitude        | 8 ASCII digits        |
/// | 14..16| terminator       | not validated         |
///
/// Failure classification is load-bearing for recovery:
/// [`DecodeError::FormatMismatch`] for any shape violation (wrong literals,
/// non-digit in a digit field, wrong length) and
/// [`DecodeError::FieldValue`] for a shaped frame whose field digit is out
/// of range. Pure function: the same bytes always produce the same result.
pub fn decode_frame(frame: &[u8]) -> Result<Reading, DecodeError> {
    // Shape checks first; any violation means the stream may be misaligned.
    if frame.len() != FRAME_LEN
        || frame[POS_START_MARKER] != START_MARKER
        || frame[POS_MID_MARKER] != MID_MARKER
        || !frame[POS_DISPLAY].is_ascii_digit()
        || !frame[POS_UNIT].is_ascii_digit()
        || !frame[POS_SIGN].is_ascii_digit()
        || !frame[POS_DECIMAL].is_ascii_digit()
        || !frame[MAGNITUDE_RANGE].iter().all(u8::is_ascii_digit)
    {
        return Err(DecodeError::FormatMismatch {
            frame: pad_frame(frame),
        });
    }

    // Shape matched; remaining failures are single corrupt frames.
    let display = frame[POS_DISPLAY];
    let sensor = match display {
        b'1'..=b'4' => (display - b'1') as usize,
        _ => {
            return Err(DecodeError::FieldValue {
                field: FrameField::Display,
                byte: display,
            })
        }
    };
    debug_assert!(sensor < SENSOR_COUNT);

    let unit = Unit::from_code(frame[POS_UNIT]).ok_or(DecodeError::FieldValue {
        field: FrameField::Unit,
        byte: frame[POS_UNIT],
    })?;

    let negative = match frame[POS_SIGN] {
        b'0' => false,
        b'1' => true,
        byte => {
            return Err(DecodeError::FieldValue {
                field: FrameField::Sign,
                byte,
            })
        }
    };

    let position = frame[POS_DECIMAL] - b'0';
    if position > MAX_DECIMAL_POSITION {
        return Err(DecodeError::FieldValue {
            field: FrameField::DecimalPosition,
            byte: frame[POS_DECIMAL],
        });
    }

    let magnitude = frame[MAGNITUDE_RANGE]
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));

    let mut value = f64::from(magnitude) / 10f64.powi(i32::from(position));
    if negative {
        value = -value;
    }

    Ok(Reading {
        sensor,
        value,
        unit,
    })
}

/// Copy a block into a fixed frame buffer for diagnostics, zero-padding
/// short input
fn pad_frame(block: &[u8]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    let len = block.len().min(FRAME_LEN);
    frame[..len].copy_from_slice(&block[..len]);
    frame
}
