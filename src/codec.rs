//! Conversions between temperatures and the MCP9808 register encoding.
//!
//! Temperature and threshold registers share one layout:
//!
//! ```text
//!  byte 0: [ flag | flag | flag | sign | 2^7 | 2^6 | 2^5 | 2^4 ]
//!  byte 1: [ 2^3  | 2^2  | 2^1  | 2^0  | 2^-1| 2^-2| 2^-3| 2^-4]
//! ```
//!
//! The three flag bits are only meaningful in the ambient temperature register, see
//! [`AlertFlags`].

const FLAG_MASK: u8 = 0b1110_0000;
const SIGN_BIT: u8 = 0b0001_0000;
const MAGNITUDE_MASK: u8 = 0b0000_1111;

const FLAG_CRITICAL: u8 = 0b1000_0000;
const FLAG_UPPER: u8 = 0b0100_0000;
const FLAG_LOWER: u8 = 0b0010_0000;

/// Decodes a temperature or threshold register into degrees Celsius.
///
/// Negative readings come back as `256 - magnitude` rather than `-magnitude`.  This mirrors the
/// vendor driver and is kept until it can be checked against hardware: a reading of `-16.25 °C`
/// is returned as `239.75`.
#[must_use]
pub fn decode_temperature(raw: [u8; 2]) -> f32 {
    let high = raw[0] & !FLAG_MASK;
    let magnitude = f32::from(high & MAGNITUDE_MASK) * 16.0 + f32::from(raw[1]) / 16.0;
    if high & SIGN_BIT == SIGN_BIT {
        256.0 - magnitude
    } else {
        magnitude
    }
}

/// Encodes a temperature for one of the threshold registers.
///
/// Thresholds only have quarter degree resolution.  The fraction is taken to two decimal places
/// (truncated) and binned by [`decimal_bin`].  Magnitudes above 255 saturate, NaN encodes as zero.
#[must_use]
pub fn encode_threshold(value: f32) -> [u8; 2] {
    let sign = u8::from(value < 0.0);
    let magnitude = libm::fabsf(value);
    // float to int casts saturate
    let integer = libm::truncf(magnitude) as u8;
    let hundredths = libm::truncf(magnitude * 100.0) as u32;
    let fraction = hundredths.saturating_sub(u32::from(integer) * 100) % 100;

    [
        (sign << 4) | (integer >> 4),
        ((integer & MAGNITUDE_MASK) << 4) | decimal_bin(fraction as u8),
    ]
}

/// Maps hundredths of a degree (`0..=99`) to the fractional nibble of a threshold register.
#[must_use]
pub const fn decimal_bin(hundredths: u8) -> u8 {
    match hundredths {
        0 => 0x00,
        1..=25 => 0x04,
        26..=49 => 0x08,
        _ => 0x0C,
    }
}

/// Comparator state carried in the top three bits of the ambient temperature register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertFlags(u8);

impl AlertFlags {
    /// Ambient temperature is at or above the critical threshold.
    #[must_use]
    pub const fn above_critical(self) -> bool {
        self.0 & FLAG_CRITICAL != 0
    }

    /// Ambient temperature is above the upper threshold.
    #[must_use]
    pub const fn above_upper(self) -> bool {
        self.0 & FLAG_UPPER != 0
    }

    /// Ambient temperature is below the lower threshold.
    #[must_use]
    pub const fn below_lower(self) -> bool {
        self.0 & FLAG_LOWER != 0
    }

    /// The raw flags, still in bit positions 7 to 5.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

#[must_use]
pub const fn decode_comparator_flags(high_byte: u8) -> AlertFlags {
    AlertFlags(high_byte & FLAG_MASK)
}
