//! Character LCDs driven by an HD44780-compatible controller behind a PCF8574 I2C expander.
//!
//! [Lcd] is the entry point: it brings the display up and exposes text, cursor and custom
//! character operations. Below it, [hd44780::driver::Pcf8574Driver] turns controller bytes into
//! expander writes, and [layout()] decides how text is spread over rows.
//!
//! ```
//! use lcdi2c_driver::bus::VirtualLcd;
//! use lcdi2c_driver::lcd::{Lcd, LcdConfig, RowSelection, ShowOptions};
//! use std::time::Duration;
//!
//! let mut bus = VirtualLcd::default();
//! let config = LcdConfig::default().with_power_on_delay(Duration::ZERO);
//! let mut lcd = Lcd::new(&mut bus, &config)?;
//! lcd.show_text("Hello, world!", &RowSelection::row(0), ShowOptions::blank_pad())?;
//!
//! assert_eq!(bus.row_text(&config.geometry, 0).unwrap(), "Hello, world!   ");
//! # Ok::<(), lcdi2c_driver::LcdError>(())
//! ```

mod config;
mod display;
mod flags;
mod geometry;
pub mod glyph;
pub mod hd44780;
mod layout;

pub use config::*;
pub use display::*;
pub use flags::*;
pub use geometry::*;
pub use glyph::Glyph;
pub use layout::*;
