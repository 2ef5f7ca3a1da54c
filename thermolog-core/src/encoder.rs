//! Frame encoding
//!
//! The device is the only producer of frames in deployment; the encoder
//! exists for the simulator, fixtures, and the round-trip law in tests.

use crate::constants::{
    Unit, FRAME_LEN, MAGNITUDE_RANGE, MAX_DECIMAL_POSITION, MAX_MAGNITUDE, MID_MARKER,
    POS_DECIMAL, POS_DISPLAY, POS_MID_MARKER, POS_SIGN, POS_START_MARKER, POS_UNIT,
    SENSOR_COUNT, START_MARKER, TERMINATOR,
};
use crate::error::Error;
use crate::types::Reading;

/// Builder for one wire frame
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    sensor: usize,
    unit: Unit,
    negative: bool,
    position: u8,
    magnitude: u32,
}

impl FrameBuilder {
    /// Create a builder for the given 0-based sensor index
    pub fn new(sensor: usize) -> Self {
        Self {
            sensor,
            unit: Unit::Celsius,
            negative: false,
            position: 0,
            magnitude: 0,
        }
    }

    /// Set the unit code
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Encode a negative value
    pub fn negative(mut self) -> Self {
        self.negative = true;
        self
    }

    /// Set the decimal-point position (divide magnitude by 10^position)
    pub fn decimal_position(mut self, position: u8) -> Self {
        self.position = position;
        self
    }

    /// Set the raw integer magnitude
    pub fn magnitude(mut self, magnitude: u32) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Build the 16-byte frame
    pub fn build(self) -> Result<[u8; FRAME_LEN], Error> {
        if self.sensor >= SENSOR_COUNT {
            return Err(Error::SensorOutOfRange(self.sensor));
        }
        if self.position > MAX_DECIMAL_POSITION {
            return Err(Error::DecimalPositionOutOfRange(self.position));
        }
        if self.magnitude > MAX_MAGNITUDE {
            return Err(Error::MagnitudeOverflow(self.magnitude));
        }

        let mut frame = [0u8; FRAME_LEN];
        frame[POS_START_MARKER] = START_MARKER;
        frame[POS_DISPLAY] = b'1' + self.sensor as u8;
        frame[POS_MID_MARKER] = MID_MARKER;
        frame[POS_UNIT] = self.unit.code();
        frame[POS_SIGN] = if self.negative { b'1' } else { b'0' };
        frame[POS_DECIMAL] = b'0' + self.position;

        let mut magnitude = self.magnitude;
        for slot in frame[MAGNITUDE_RANGE].iter_mut().rev() {
            *slot = b'0' + (magnitude % 10) as u8;
            magnitude /= 10;
        }

        frame[MAGNITUDE_RANGE.end..].copy_from_slice(TERMINATOR);

        Ok(frame)
    }
}

/// Encode a reading at a given decimal position
///
/// The value must be exactly representable: `|value| * 10^position` has to
/// land on an integer within the 8-digit magnitude field.
pub fn encode_reading(reading: &Reading, position: u8) -> Result<[u8; FRAME_LEN], Error> {
    if position > MAX_DECIMAL_POSITION {
        return Err(Error::DecimalPositionOutOfRange(position));
    }

    let scaled = reading.value.abs() * 10f64.powi(i32::from(position));
    let magnitude = scaled.round();
    // Scaling by a power of ten is not exact in binary; tolerate the
    // rounding slack of values that decode_frame itself can produce.
    if (scaled - magnitude).abs() > 1e-6 || magnitude > f64::from(MAX_MAGNITUDE) {
        return Err(Error::UnrepresentableValue(reading.value, position));
    }

    let mut builder = FrameBuilder::new(reading.sensor)
        .unit(reading.unit)
        .decimal_position(position)
        .magnitude(magnitude as u32);
    if reading.value.is_sign_negative() {
        builder = builder.negative();
    }
    builder.build()
}
