//! Configuration register (`0x01`) and resolution register (`0x08`) fields.
//!
//! Every configuration field is a disjoint mask within the 16 bit configuration word.  Enum
//! discriminants are the field values already shifted into place, so a raw `u16` register code
//! converts with [`TryFrom`] and is rejected if it is not one of the allowed values.
//!
//! ```text
//!  15..11  10..9  8     7          6           5          4       3       2       1         0
//!  -       HYST   SHDN  CRIT LOCK  WIN LOCK    INT CLEAR  STATUS  ALERT   SELECT  POLARITY  MODE
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::OutOfRange;

const INTERRUPT_CLEAR: u16 = 0x0020;
const ALERT_STATUS: u16 = 0x0010;

/// A bitfield of the configuration register.
pub trait Field: Copy + Into<u16> + TryFrom<u16> {
    const MASK: u16;
    /// Value after a power-on reset.
    const POWER_ON: Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum PowerMode {
    /// Continuous conversion.
    Continuous = 0x0000,
    /// Shutdown.  Conversions stop but registers stay accessible.
    LowPower = 0x0100,
}

impl Field for PowerMode {
    const MASK: u16 = 0x0100;
    const POWER_ON: Self = Self::Continuous;
}

/// Hysteresis applied to every threshold when the temperature is falling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Hysteresis {
    Zero = 0x0000,
    OneAndAHalf = 0x0200,
    Three = 0x0400,
    Six = 0x0600,
}

impl Field for Hysteresis {
    const MASK: u16 = 0x0600;
    const POWER_ON: Self = Self::Zero;
}

/// Write protection of the threshold registers.  Lock bits latch until the device loses power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum LockState {
    Unlocked = 0x0000,
    /// Upper and lower thresholds are locked.
    WindowLocked = 0x0040,
    /// Critical threshold is locked.
    CritLocked = 0x0080,
    CritWindowLocked = 0x00C0,
}

impl LockState {
    #[must_use]
    pub fn is_locked(self) -> bool {
        self != Self::Unlocked
    }

    /// Whether every lock bit set in `self` is also set in `other`.
    #[must_use]
    pub fn is_subset_of(self, other: Self) -> bool {
        let (bits, other): (u16, u16) = (self.into(), other.into());
        bits & !other == 0
    }
}

impl Field for LockState {
    const MASK: u16 = 0x00C0;
    const POWER_ON: Self = Self::Unlocked;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum AlertEnable {
    Disabled = 0x0000,
    Enabled = 0x0008,
}

impl Field for AlertEnable {
    const MASK: u16 = 0x0008;
    const POWER_ON: Self = Self::Disabled;
}

/// Which thresholds drive the alert output.  [`AlertResponseMode::CritOnly`] is not meaningful in
/// interrupt mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum AlertResponseMode {
    UpperLowerCrit = 0x0000,
    CritOnly = 0x0004,
}

impl Field for AlertResponseMode {
    const MASK: u16 = 0x0004;
    const POWER_ON: Self = Self::UpperLowerCrit;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum AlertPolarity {
    ActiveLow = 0x0000,
    ActiveHigh = 0x0002,
}

impl Field for AlertPolarity {
    const MASK: u16 = 0x0002;
    const POWER_ON: Self = Self::ActiveLow;
}

/// In comparator mode the alert pin follows the temperature.  In interrupt mode it latches
/// until cleared with [`crate::Mcp9808::clear_interrupt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum AlertOutputMode {
    Comparator = 0x0000,
    Interrupt = 0x0001,
}

impl Field for AlertOutputMode {
    const MASK: u16 = 0x0001;
    const POWER_ON: Self = Self::Comparator;
}

/// Measurement resolution, stored in its own register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    /// 0.5 °C
    Half = 0x00,
    /// 0.25 °C
    Quarter = 0x01,
    /// 0.125 °C
    Eighth = 0x02,
    /// 0.0625 °C
    Sixteenth = 0x03,
}

impl Resolution {
    pub(crate) const MASK: u8 = 0x03;

    /// Step size in degrees Celsius.
    #[must_use]
    pub const fn step(self) -> f32 {
        match self {
            Self::Half => 0.5,
            Self::Quarter => 0.25,
            Self::Eighth => 0.125,
            Self::Sixteenth => 0.0625,
        }
    }
}

impl TryFrom<f32> for Resolution {
    type Error = OutOfRange;

    /// Accepts a step size in degrees Celsius.  Only the four exact steps are valid.
    #[allow(clippy::float_cmp)]
    fn try_from(step: f32) -> Result<Self, Self::Error> {
        [Self::Half, Self::Quarter, Self::Eighth, Self::Sixteenth]
            .into_iter()
            .find(|resolution| resolution.step() == step)
            .ok_or(OutOfRange)
    }
}

/// The 16 bit configuration word, most significant byte first on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister(u16);

impl ConfigRegister {
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Reads one field.  Every masked value of every field is a valid variant, so the fallback is
    /// never taken.
    #[must_use]
    pub fn field<F: Field>(self) -> F {
        F::try_from(self.0 & F::MASK).unwrap_or(F::POWER_ON)
    }

    /// Replaces one field, leaving every other bit as it was.
    #[must_use]
    pub fn with<F: Field>(self, value: F) -> Self {
        let bits: u16 = value.into();
        Self((self.0 & !F::MASK) | bits)
    }

    #[must_use]
    pub fn power_mode(self) -> PowerMode {
        self.field()
    }

    #[must_use]
    pub fn hysteresis(self) -> Hysteresis {
        self.field()
    }

    #[must_use]
    pub fn lock_state(self) -> LockState {
        self.field()
    }

    #[must_use]
    pub fn alert_enable(self) -> AlertEnable {
        self.field()
    }

    #[must_use]
    pub fn alert_response_mode(self) -> AlertResponseMode {
        self.field()
    }

    #[must_use]
    pub fn alert_polarity(self) -> AlertPolarity {
        self.field()
    }

    #[must_use]
    pub fn alert_output_mode(self) -> AlertOutputMode {
        self.field()
    }

    /// Alert output is currently asserted.  Read only.
    #[must_use]
    pub const fn alert_status(self) -> bool {
        self.0 & ALERT_STATUS != 0
    }

    #[must_use]
    pub const fn interrupt_clear(self) -> bool {
        self.0 & INTERRUPT_CLEAR != 0
    }

    #[must_use]
    pub const fn with_interrupt_clear(self) -> Self {
        Self(self.0 | INTERRUPT_CLEAR)
    }
}
