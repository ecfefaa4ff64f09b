mod i2c;

use crate::lcd::hd44780::{
    CLEAR_DISPLAY, CURSOR_SHIFT, RETURN_HOME, SET_CGRAM_ADDRESS, SET_DDRAM_ADDRESS, SHIFT_DISPLAY,
    SHIFT_RIGHT,
};
use crate::{LcdError, LcdResult};
pub use i2c::*;
use std::fmt::Debug;

pub trait HD44780Driver: Debug {
    /// Brings the controller's interface into 4-bit mode.
    ///
    /// Only the interface is negotiated here; function set, display control and entry mode are left
    /// to the caller.
    fn init(&mut self) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    ///
    /// The controller stays busy for up to 1.52 ms afterwards.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)
    }

    /// Sets the cursor to the home position and undoes any display shift.
    ///
    /// The controller stays busy for up to 1.52 ms afterwards.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)
    }

    /// Moves the cursor or shifts the display, without touching DDRAM.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = CURSOR_SHIFT;
        if display_shift {
            command |= SHIFT_DISPLAY;
        }
        if direction == CursorDirection::Right {
            command |= SHIFT_RIGHT;
        }
        self.send_command(command)
    }

    /// Sets the CGRAM address. Following data writes go to the character generator.
    fn set_cgram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b00111111 {
            return Err(LcdError::InvalidArgument("CGRAM address must be below 0x40"));
        }
        self.send_command(SET_CGRAM_ADDRESS | address)
    }

    /// Sets the DDRAM address. Following data writes go to the display.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b01111111 {
            return Err(LcdError::InvalidArgument("DDRAM address must be below 0x80"));
        }
        self.send_command(SET_DDRAM_ADDRESS | address)
    }

    // Low-level commands, implemented by the transport-specific driver.

    /// Sends a command to the HD44780 controller (RS low).
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends data to the HD44780 controller (RS high).
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    Left,
    Right,
}
