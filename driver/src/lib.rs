//! Driver for HD44780 character LCDs attached through a PCF8574 I2C backpack.
//!
//! See [lcd::Lcd] to get started, and [bus] for the transports it can run on.

pub mod bus;
pub mod lcd;

use thiserror::Error;

/// Errors reported by an I2C transport.
///
/// The driver never retries; every one of these is handed straight back to the caller of the
/// operation that hit it.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum BusError {
    #[error("device did not acknowledge")]
    NoAcknowledge,
    #[error("bus arbitration lost")]
    ArbitrationLoss,
    #[error("bus error (misplaced start or stop condition)")]
    Bus,
    #[error("bus overrun")]
    Overrun,
    /// Raised by transports backed by a file or socket, such as a hand-written `i2c-dev` bus.
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
    #[error("error: {0}")]
    Other(String),
}

/// Lets [bus::I2cBus] implementations built on `std::io` use `?` directly.
impl From<std::io::Error> for BusError {
    fn from(err: std::io::Error) -> Self {
        BusError::Io(err.kind())
    }
}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLoss,
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::Overrun => BusError::Overrun,
            other => BusError::Other(format!("{:?}", other)),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("bus error: {0}")]
    Bus(#[from] BusError),
    #[error("cursor position (row {row}, column {col}) must be within rows 0..{rows} and columns 0..{columns}")]
    InvalidPosition {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("unsupported display geometry {columns}x{rows}")]
    UnsupportedGeometry { columns: usize, rows: usize },
    #[error("the controller has not been initialized")]
    Uninitialized,
}

pub type LcdResult<T> = Result<T, LcdError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::I2cBus;
    use crate::lcd::{Lcd, LcdConfig};
    use std::io::{ErrorKind, Write};
    use std::time::Duration;

    /// A bus that forwards expander bytes into any `io::Write`.
    #[derive(Debug)]
    struct WriterBus<W>(W);

    impl<W: Write + std::fmt::Debug> I2cBus for WriterBus<W> {
        fn transmit(&mut self, _address: u16, bytes: &[u8]) -> Result<(), BusError> {
            self.0.write_all(bytes)?;
            Ok(())
        }
    }

    #[test]
    fn io_errors_surface_through_the_lcd() {
        // Room for the reset write and the first nibble only
        let mut bus = WriterBus(std::io::Cursor::new([0u8; 4]));
        let config = LcdConfig::default().with_power_on_delay(Duration::ZERO);

        let result = Lcd::new(&mut bus, &config);

        assert_eq!(result.unwrap_err(), LcdError::Bus(BusError::Io(ErrorKind::WriteZero)));
    }

    #[test]
    fn io_backed_bus_sees_every_expander_byte() {
        let mut bus = WriterBus(Vec::new());
        let config = LcdConfig::default().with_power_on_delay(Duration::ZERO);

        Lcd::new(&mut bus, &config).unwrap();

        // Reset write, then 0x3 nibble latched with backlight on
        assert_eq!(&bus.0[..4], &[0x08, 0x38, 0x3C, 0x38]);
    }
}
