#![no_std]
#![doc = include_str!("../README.md")]

use embedded_hal::i2c::I2c;

pub trait WhoAmI<I2C: I2c, T: core::cmp::Eq> {
    const EXPECTED_WHOAMI: T;

    fn whoami(&mut self) -> Result<T, I2C::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange;

pub trait Driver<I2C: I2c, T> {
    fn address_check(address: u8) -> Result<(), OutOfRange> {
        if (0x08..=0x77).contains(&address) {
            Ok(())
        } else {
            Err(OutOfRange)
        }
    }
    fn new_inner(i2c: I2C, address: u8) -> Self;

    /// The entry point for a [`Driver`].  Expects [`I2c`] (obtainable from target platform HAL)
    /// and an I2C device address in the range `0x08..=0x77`.  This provides a handle that does not
    /// touch the hardware.  Identification is deferred to [`Driver::init`].
    ///
    /// # Errors
    ///
    /// [`OutOfRange`]: address is ouside of the allowed range `0x08..=0x77`
    fn new(i2c: I2C, address: u8) -> Result<Self, OutOfRange>
    where
        Self: Sized,
    {
        Self::address_check(address)?;
        Ok(Self::new_inner(i2c, address))
    }
    fn init_inner(self) -> Result<Self, T>
    where
        Self: Sized,
    {
        Ok(self)
    }

    /// Checks that the hardware at the configured address is the expected device.  Nothing is
    /// written to the device.
    ///
    /// # Errors
    ///
    /// [`T`]: a device dependent error type for any problems encountered during initialization.
    fn init(self) -> Result<Self, T>
    where
        Self: Sized,
    {
        self.init_inner()
    }
}

pub mod codec;
pub mod config;
pub mod mcp9808;

pub use codec::AlertFlags;
pub use config::{
    AlertEnable, AlertOutputMode, AlertPolarity, AlertResponseMode, ConfigRegister, Hysteresis,
    LockState, PowerMode, Resolution,
};
pub use mcp9808::{whoami::Identity, Error, Mcp9808, DEFAULT_ADDRESS};
