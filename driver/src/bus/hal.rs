use crate::BusError;
use crate::bus::I2cBus;
use embedded_hal::i2c::{Error, I2c, SevenBitAddress};
use log::trace;
use std::fmt::{Debug, Formatter};

/// Adapts an [embedded_hal::i2c::I2c] bus to [I2cBus].
///
/// Only 7-bit addressing is supported, which covers every PCF8574 variant (`0x20..=0x27` and
/// `0x38..=0x3F` for the PCF8574A).
pub struct HalI2cBus<I> {
    i2c: I,
}

impl<I: I2c<SevenBitAddress>> HalI2cBus<I> {
    pub fn new(i2c: I) -> Self {
        HalI2cBus { i2c }
    }

    /// Gives the wrapped bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I> Debug for HalI2cBus<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "HalI2cBus({})", std::any::type_name::<I>())
    }
}

impl<I: I2c<SevenBitAddress>> I2cBus for HalI2cBus<I> {
    fn transmit(&mut self, address: u16, bytes: &[u8]) -> Result<(), BusError> {
        let address = u8::try_from(address)
            .ok()
            .filter(|address| *address <= 0x7F)
            .ok_or_else(|| BusError::Other(format!("address {:#x} is not a 7-bit address", address)))?;

        trace!("I2C write @{:#04x}: {:02x?}", address, bytes);

        self.i2c
            .write(address, bytes)
            .map_err(|err| BusError::from(err.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn forwards_writes_to_the_wrapped_bus() {
        let expectations = [
            I2cTransaction::write(0x27, vec![0b1010_1001]),
            I2cTransaction::write(0x27, vec![0b1010_1101]),
        ];
        let mut bus = HalI2cBus::new(I2cMock::new(&expectations));

        bus.transmit(0x27, &[0b1010_1001]).unwrap();
        bus.transmit(0x27, &[0b1010_1101]).unwrap();

        bus.release().done();
    }

    #[test]
    fn maps_nack_to_bus_error() {
        let expectations = [I2cTransaction::write(0x3F, vec![0x08])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut bus = HalI2cBus::new(I2cMock::new(&expectations));

        assert_eq!(bus.transmit(0x3F, &[0x08]), Err(BusError::NoAcknowledge));

        bus.release().done();
    }

    #[test]
    fn rejects_ten_bit_addresses_without_touching_the_bus() {
        let mut bus = HalI2cBus::new(I2cMock::new(&[]));

        assert!(matches!(bus.transmit(0x1FF, &[0x00]), Err(BusError::Other(_))));

        bus.release().done();
    }
}
