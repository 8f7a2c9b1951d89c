use super::{REG_DEVICE_ID, REG_MANUFACTURER_ID};
use crate::{mcp9808::Mcp9808, WhoAmI};
use embedded_hal::i2c::I2c;

/// Contents of the device ID and manufacturer ID registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// First byte of the device ID register.  The second byte is the silicon revision.
    pub device_id: u8,
    /// Second byte of the manufacturer ID register.
    pub manufacturer_id: u8,
}

impl<I2C: I2c> WhoAmI<I2C, Identity> for Mcp9808<I2C> {
    const EXPECTED_WHOAMI: Identity = Identity {
        device_id: 0x04,
        manufacturer_id: 0x54,
    };

    fn whoami(&mut self) -> Result<Identity, I2C::Error> {
        let device: [u8; 2] = self.read_register(REG_DEVICE_ID)?;
        let manufacturer: [u8; 2] = self.read_register(REG_MANUFACTURER_ID)?;
        Ok(Identity {
            device_id: device[0],
            manufacturer_id: manufacturer[1],
        })
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod whoami_test {
    extern crate std;
    use std::vec;
    extern crate embedded_hal;
    extern crate embedded_hal_mock;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::Identity;
    use crate::{mcp9808::Mcp9808, WhoAmI};

    #[test]
    pub fn whoami() {
        let expectations = [
            I2cTransaction::write_read(0x1F, vec![0x07], vec![0x04, 0x01]),
            I2cTransaction::write_read(0x1F, vec![0x06], vec![0x00, 0x54]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut mcp9808 = Mcp9808 { i2c, address: 0x1F };
        assert_eq!(
            mcp9808.whoami(),
            Ok(Identity {
                device_id: 0x04,
                manufacturer_id: 0x54
            })
        );

        i2c_clone.done();
    }
}
