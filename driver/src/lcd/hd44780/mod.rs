//! HD44780 instruction set and the PCF8574 backpack wiring.
//!
//! Every instruction is a single byte whose highest set bit selects the command; the lower bits are
//! its flags. See [driver::HD44780Driver] for the commands themselves.
//!
//! # Backpack wiring
//!
//! The common PCF8574 "I2C backpack" drives the controller in 4-bit mode. Each byte written to the
//! expander sets its eight output pins:
//!
//! | Bit | Pin         |
//! |-----|-------------|
//! | 0   | RS          |
//! | 1   | R/W         |
//! | 2   | E (enable)  |
//! | 3   | Backlight   |
//! | 4–7 | D4–D7       |
//!
//! # Sources
//!
//! - Hitachi, “HD44780U (LCD-II) Dot Matrix Liquid Crystal Display Controller/Driver,” rev. 0.0,
//! - NXP Semiconductors, “PCF8574; PCF8574A Remote 8-bit I/O expander for I2C-bus with interrupt,”
//!   rev. 5.

pub mod driver;

pub const CLEAR_DISPLAY: u8 = 0b00000001;
pub const RETURN_HOME: u8 = 0b00000010;
pub const ENTRY_MODE_SET: u8 = 0b00000100;
pub const DISPLAY_CONTROL: u8 = 0b00001000;
pub const CURSOR_SHIFT: u8 = 0b00010000;
pub const FUNCTION_SET: u8 = 0b00100000;
pub const SET_CGRAM_ADDRESS: u8 = 0b01000000;
pub const SET_DDRAM_ADDRESS: u8 = 0b10000000;

// Entry mode flags
pub const ENTRY_INCREMENT: u8 = 0b00000010;
pub const ENTRY_SHIFT: u8 = 0b00000001;

// Display control flags
pub const DISPLAY_ON: u8 = 0b00000100;
pub const CURSOR_ON: u8 = 0b00000010;
pub const BLINK_ON: u8 = 0b00000001;

// Cursor/display shift flags
pub const SHIFT_DISPLAY: u8 = 0b00001000;
pub const SHIFT_RIGHT: u8 = 0b00000100;

// Function set flags
pub const EIGHT_BIT_MODE: u8 = 0b00010000;
pub const TWO_LINES: u8 = 0b00001000;
pub const DOTS_5X10: u8 = 0b00000100;

// Expander pins
pub const EXPANDER_RS: u8 = 0b00000001;
pub const EXPANDER_RW: u8 = 0b00000010;
pub const EXPANDER_ENABLE: u8 = 0b00000100;
pub const EXPANDER_BACKLIGHT: u8 = 0b00001000;
