use crate::bus::I2cBus;
use crate::lcd::hd44780::driver::HD44780Driver;
use crate::lcd::hd44780::{
    EIGHT_BIT_MODE, EXPANDER_BACKLIGHT, EXPANDER_ENABLE, EXPANDER_RS, FUNCTION_SET,
};
use crate::{BusError, LcdError, LcdResult};
use log::{debug, trace};
use std::thread::sleep;
use std::time::Duration;

/// How long the enable line is held high for every nibble.
pub const STROBE_HOLD: Duration = Duration::from_micros(200);
/// How long to wait after the enable line goes low before the next nibble.
pub const SETTLE: Duration = Duration::from_micros(50);
/// Settle times after each of the three "8-bit mode" nibbles sent during initialization.
pub const NEGOTIATION_SETTLE: [Duration; 3] = [
    Duration::from_micros(4500),
    Duration::from_micros(4500),
    Duration::from_micros(150),
];
/// Minimum time to wait after power-on before talking to the controller.
pub const DEFAULT_POWER_ON_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    /// Nothing was negotiated yet, or the last negotiation failed.
    Uninitialized,
    /// The controller is in 4-bit mode and accepts commands.
    Ready,
}

/// HD44780 driver talking through a PCF8574 I2C expander in 4-bit mode.
///
/// Every controller byte is sent as two nibbles, high nibble first. Each nibble takes three
/// expander writes: data latched with enable low, enable raised and held for [STROBE_HOLD], enable
/// dropped followed by [SETTLE]. The backlight bit rides along in every write.
#[derive(Debug)]
pub struct Pcf8574Driver<'a> {
    bus: &'a mut dyn I2cBus,
    address: u16,
    backlight: bool,
    state: DriverState,
    power_on_delay: Duration,
}

impl<'a> Pcf8574Driver<'a> {
    pub fn new(bus: &'a mut dyn I2cBus, address: u16, backlight: bool) -> Self {
        Pcf8574Driver {
            bus,
            address,
            backlight,
            state: DriverState::Uninitialized,
            power_on_delay: DEFAULT_POWER_ON_DELAY,
        }
    }

    /// Overrides the wait before the first write of [HD44780Driver::init].
    pub fn with_power_on_delay(mut self, delay: Duration) -> Self {
        self.power_on_delay = delay;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Switches the backlight with a single expander write, without pulsing enable.
    ///
    /// Works in any state, as it never reaches the controller.
    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        let byte = if on { EXPANDER_BACKLIGHT } else { 0 };
        self.expander_write(byte)?;
        self.backlight = on;
        debug!("Backlight {}", if on { "on" } else { "off" });
        Ok(())
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight { EXPANDER_BACKLIGHT } else { 0 }
    }

    fn expander_write(&mut self, byte: u8) -> Result<(), BusError> {
        trace!("Expander: {:08b}", byte);
        self.bus.transmit(self.address, &[byte])
    }

    /// Clocks one nibble into the controller. `nibble` is already in the upper four bits.
    fn write_nibble(&mut self, nibble: u8, rs: bool, settle: Duration) -> LcdResult<()> {
        let mut byte = (nibble & 0xF0) | self.backlight_bit();
        if rs {
            byte |= EXPANDER_RS;
        }

        self.expander_write(byte)?;
        self.expander_write(byte | EXPANDER_ENABLE)?;
        sleep(STROBE_HOLD);
        self.expander_write(byte)?;
        sleep(settle);
        Ok(())
    }

    fn write_byte(&mut self, value: u8, rs: bool) -> LcdResult<()> {
        if self.state != DriverState::Ready {
            return Err(LcdError::Uninitialized);
        }

        trace!("Sending {}: {:08b}", if rs { "data" } else { "command" }, value);

        self.write_nibble(value & 0xF0, rs, SETTLE)?;
        self.write_nibble(value << 4, rs, SETTLE)
    }
}

impl HD44780Driver for Pcf8574Driver<'_> {
    fn init(&mut self) -> LcdResult<()> {
        self.state = DriverState::Uninitialized;

        debug!("Waiting {:?} for the controller to power up...", self.power_on_delay);
        sleep(self.power_on_delay);

        // All lines low, backlight as configured
        self.expander_write(self.backlight_bit())?;

        // Whatever mode the controller was left in, three "8-bit" nibbles resynchronize it
        debug!("Negotiating 4-bit interface @{:#04x}...", self.address);
        for settle in NEGOTIATION_SETTLE {
            self.write_nibble(FUNCTION_SET | EIGHT_BIT_MODE, false, settle)?;
        }
        self.write_nibble(FUNCTION_SET, false, SETTLE)?;

        self.state = DriverState::Ready;
        debug!("Controller @{:#04x} ready.", self.address);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.write_byte(command, false)
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.write_byte(data, true)
    }
}
