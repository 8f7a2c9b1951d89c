//! # Rust Driver for the MCP9808 Digital Temperature Sensor
//!
//! ## External Links
//!
//! - [Product Site]
//! - [Datasheet]
//!
//! [Product Site]: https://www.microchip.com/en-us/product/MCP9808
//! [Datasheet]: https://ww1.microchip.com/downloads/en/DeviceDoc/25095A.pdf

use crate::codec::{decode_comparator_flags, decode_temperature, encode_threshold, AlertFlags};
use crate::config::{
    AlertEnable, AlertOutputMode, AlertPolarity, AlertResponseMode, ConfigRegister, Field,
    Hysteresis, LockState, PowerMode, Resolution,
};
use crate::{Driver, WhoAmI};
use embedded_hal::i2c::I2c;

/// Address with A2, A1 and A0 tied low.  Address pins select `0x18..=0x1F`.
pub const DEFAULT_ADDRESS: u8 = 0x18;

const REG_CONFIG: u8 = 0x01;
const REG_T_UPPER: u8 = 0x02;
const REG_T_LOWER: u8 = 0x03;
const REG_T_CRIT: u8 = 0x04;
const REG_TEMPERATURE: u8 = 0x05;
const REG_MANUFACTURER_ID: u8 = 0x06;
const REG_DEVICE_ID: u8 = 0x07;
const REG_RESOLUTION: u8 = 0x08;

/// Smallest allowed gap between the upper and lower thresholds, in degrees Celsius.
const MIN_WINDOW: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    I2cError(E),
    /// Argument is not one of the values allowed for the field.
    InvalidParameter,
    /// A lock bit is set, so the configuration cannot change until the device is power cycled.
    RegisterLocked,
    /// Upper threshold is less than 2 °C above the lower threshold.
    ThresholdRange,
    /// Device or manufacturer ID did not match.
    UnexpectedDevice,
    /// Lock bits only clear on a power cycle.
    PowerCycleRequired,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::I2cError(error)
    }
}

/// The MCP9808 driver.
///
/// No device state is cached.  Getters read the device every time and setters read, modify and
/// write back the whole register.  The driver owns the bus handle, so concurrent use from several
/// threads has to be serialized by the caller (a shared bus from `embedded-hal-bus`, a mutex).
pub struct Mcp9808<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Driver<I2C, Error<I2C::Error>> for Mcp9808<I2C> {
    fn new_inner(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    fn init_inner(mut self) -> Result<Self, Error<I2C::Error>> {
        if !self.initialize()? {
            return Err(Error::UnexpectedDevice);
        }
        Ok(self)
    }
}

impl<I2C: I2c> Mcp9808<I2C> {
    /// Whether the device and manufacturer IDs match an MCP9808.
    pub fn initialize(&mut self) -> Result<bool, I2C::Error> {
        Ok(self.whoami()? == Self::EXPECTED_WHOAMI)
    }

    /// Whether anything acknowledges the configured address.
    pub fn probe(&mut self) -> bool {
        self.i2c.write(self.address, &[]).is_ok()
    }

    /// Gives back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register<const N: usize>(&mut self, register: u8) -> Result<[u8; N], I2C::Error> {
        let mut data: [u8; N] = [0; N];
        self.i2c.write_read(self.address, &[register], &mut data)?;
        Ok(data)
    }

    fn validate<T, V: TryInto<T>>(value: V) -> Result<T, Error<I2C::Error>> {
        value.try_into().map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::debug!("parameter error");
            Error::InvalidParameter
        })
    }

    fn write_register(&mut self, register: u8, data: [u8; 2]) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, data[0], data[1]])
    }

    fn write_config(&mut self, config: ConfigRegister) -> Result<(), I2C::Error> {
        self.write_register(REG_CONFIG, config.to_be_bytes())
    }

    /// Reads the configuration register and runs `op` only if no lock bit is set.
    fn with_unlocked<T>(
        &mut self,
        op: impl FnOnce(&mut Self, ConfigRegister) -> Result<T, Error<I2C::Error>>,
    ) -> Result<T, Error<I2C::Error>> {
        let config = self.config()?;
        if config.lock_state().is_locked() {
            #[cfg(feature = "defmt")]
            defmt::debug!("register is locked until power cycle");
            return Err(Error::RegisterLocked);
        }
        op(self, config)
    }

    fn modify_config<F: Field, V: TryInto<F>>(
        &mut self,
        value: V,
    ) -> Result<(), Error<I2C::Error>> {
        self.with_unlocked(|mcp9808, config| {
            let value: F = Self::validate(value)?;
            mcp9808.write_config(config.with(value))?;
            Ok(())
        })
    }

    /// Ambient temperature in degrees Celsius.  See [`decode_temperature`] for the handling of
    /// negative readings.
    pub fn temperature(&mut self) -> Result<f32, I2C::Error> {
        Ok(decode_temperature(self.read_register(REG_TEMPERATURE)?))
    }

    /// Which thresholds the ambient temperature has crossed.
    pub fn comparator_state(&mut self) -> Result<AlertFlags, I2C::Error> {
        let data: [u8; 2] = self.read_register(REG_TEMPERATURE)?;
        Ok(decode_comparator_flags(data[0]))
    }

    pub fn config(&mut self) -> Result<ConfigRegister, I2C::Error> {
        Ok(ConfigRegister::from_be_bytes(self.read_register(REG_CONFIG)?))
    }

    /// Sets the measurement resolution from a [`Resolution`], its register code (`u8`) or its step
    /// size in degrees Celsius (`f32`).  Not affected by the lock bits.
    pub fn set_resolution<R: TryInto<Resolution>>(
        &mut self,
        resolution: R,
    ) -> Result<(), Error<I2C::Error>> {
        let resolution: Resolution = Self::validate(resolution)?;
        self.i2c
            .write(self.address, &[REG_RESOLUTION, resolution.into()])?;
        Ok(())
    }

    pub fn resolution(&mut self) -> Result<Resolution, I2C::Error> {
        let data: [u8; 1] = self.read_register(REG_RESOLUTION)?;
        // every two bit code is a resolution
        Ok(Resolution::try_from(data[0] & Resolution::MASK).unwrap_or(Resolution::Sixteenth))
    }

    pub fn set_power_mode<M: TryInto<PowerMode>>(
        &mut self,
        mode: M,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<PowerMode, M>(mode)
    }

    pub fn power_mode(&mut self) -> Result<PowerMode, I2C::Error> {
        Ok(self.config()?.power_mode())
    }

    pub fn set_alert_hysteresis<H: TryInto<Hysteresis>>(
        &mut self,
        hysteresis: H,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<Hysteresis, H>(hysteresis)
    }

    pub fn alert_hysteresis(&mut self) -> Result<Hysteresis, I2C::Error> {
        Ok(self.config()?.hysteresis())
    }

    pub fn set_alert_enable<A: TryInto<AlertEnable>>(
        &mut self,
        enable: A,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<AlertEnable, A>(enable)
    }

    pub fn alert_enable(&mut self) -> Result<AlertEnable, I2C::Error> {
        Ok(self.config()?.alert_enable())
    }

    pub fn set_alert_output_mode<M: TryInto<AlertOutputMode>>(
        &mut self,
        mode: M,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<AlertOutputMode, M>(mode)
    }

    pub fn alert_output_mode(&mut self) -> Result<AlertOutputMode, I2C::Error> {
        Ok(self.config()?.alert_output_mode())
    }

    pub fn set_polarity<P: TryInto<AlertPolarity>>(
        &mut self,
        polarity: P,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<AlertPolarity, P>(polarity)
    }

    pub fn polarity(&mut self) -> Result<AlertPolarity, I2C::Error> {
        Ok(self.config()?.alert_polarity())
    }

    pub fn set_alert_response_mode<M: TryInto<AlertResponseMode>>(
        &mut self,
        mode: M,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_config::<AlertResponseMode, M>(mode)
    }

    pub fn alert_response_mode(&mut self) -> Result<AlertResponseMode, I2C::Error> {
        Ok(self.config()?.alert_response_mode())
    }

    /// Sets lock bits.  This is allowed while the device is locked, but lock bits latch until the
    /// next power cycle: asking for a state without a lock bit that is already set fails with
    /// [`Error::PowerCycleRequired`] and nothing is written.
    pub fn set_lock_state<L: TryInto<LockState>>(
        &mut self,
        lock: L,
    ) -> Result<(), Error<I2C::Error>> {
        let config = self.config()?;
        let lock: LockState = Self::validate(lock)?;
        if !config.lock_state().is_subset_of(lock) {
            #[cfg(feature = "defmt")]
            defmt::debug!("lock bits only clear on power cycle");
            return Err(Error::PowerCycleRequired);
        }
        self.write_config(config.with(lock))?;
        Ok(())
    }

    pub fn lock_state(&mut self) -> Result<LockState, I2C::Error> {
        Ok(self.config()?.lock_state())
    }

    /// Releases a latched interrupt on the alert pin.  Works regardless of the lock bits.
    pub fn clear_interrupt(&mut self) -> Result<(), I2C::Error> {
        let config = self.config()?;
        self.write_config(config.with_interrupt_clear())
    }

    /// Writes the alert window.  `upper` has to be at least 2 °C above `lower`.  Both are stored
    /// with quarter degree resolution, see [`encode_threshold`].
    pub fn set_upper_lower_threshold(
        &mut self,
        upper: f32,
        lower: f32,
    ) -> Result<(), Error<I2C::Error>> {
        let window = upper - lower;
        if window.is_nan() || window < MIN_WINDOW {
            #[cfg(feature = "defmt")]
            defmt::debug!("thresholds are less than two degrees apart");
            return Err(Error::ThresholdRange);
        }
        self.with_unlocked(|mcp9808, _| {
            mcp9808.write_register(REG_T_UPPER, encode_threshold(upper))?;
            mcp9808.write_register(REG_T_LOWER, encode_threshold(lower))?;
            Ok(())
        })
    }

    pub fn set_crit_threshold(&mut self, value: f32) -> Result<(), Error<I2C::Error>> {
        self.with_unlocked(|mcp9808, _| {
            mcp9808.write_register(REG_T_CRIT, encode_threshold(value))?;
            Ok(())
        })
    }

    pub fn upper_threshold(&mut self) -> Result<f32, I2C::Error> {
        Ok(decode_temperature(self.read_register(REG_T_UPPER)?))
    }

    pub fn lower_threshold(&mut self) -> Result<f32, I2C::Error> {
        Ok(decode_temperature(self.read_register(REG_T_LOWER)?))
    }

    pub fn crit_threshold(&mut self) -> Result<f32, I2C::Error> {
        Ok(decode_temperature(self.read_register(REG_T_CRIT)?))
    }
}


pub mod whoami;
