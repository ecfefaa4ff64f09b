//! I2C transports the LCD driver can talk through.
//!
//! The driver only needs one primitive, [I2cBus::transmit], and never configures the bus itself
//! (frequency, pins and ownership all belong to whoever hands the bus over). Two implementations
//! live here:
//!
//! - [HalI2cBus], which adapts any [embedded_hal::i2c::I2c] implementation,
//! - [VirtualLcd], an in-memory PCF8574 + HD44780 model that decodes everything it receives. It is
//!   used by the tests, and by the demo on machines without an I2C bus.

mod hal;
mod virtual_lcd;

use crate::BusError;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
pub use hal::*;
pub use virtual_lcd::*;

/// A byte-oriented I2C write primitive.
pub trait I2cBus: Debug {
    /// Writes `bytes` to the device at `address` in a single transaction.
    fn transmit(&mut self, address: u16, bytes: &[u8]) -> Result<(), BusError>;
}

/// Lets a bus be shared with whoever wants to look at it while a driver holds it, like a test
/// inspecting a [VirtualLcd].
impl<T: I2cBus> I2cBus for Rc<RefCell<T>> {
    fn transmit(&mut self, address: u16, bytes: &[u8]) -> Result<(), BusError> {
        self.borrow_mut().transmit(address, bytes)
    }
}
