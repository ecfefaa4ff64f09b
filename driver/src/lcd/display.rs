use crate::bus::I2cBus;
use crate::lcd::glyph::{GLYPH_SLOTS, Glyph};
use crate::lcd::hd44780::driver::{CursorDirection, HD44780Driver, Pcf8574Driver};
use crate::lcd::layout::{RowSelection, ShowOptions, layout};
use crate::lcd::{ControllerFlags, DisplayGeometry, LcdConfig, PositionPolicy};
use crate::{LcdError, LcdResult};
use log::{debug, warn};
use std::thread::sleep;
use std::time::Duration;

/// How long `clear` and `home` block. The controller needs 1.52 ms.
pub const CLEAR_HOME_DELAY: Duration = Duration::from_millis(2);

/// A character LCD behind a PCF8574 backpack.
///
/// Owns the protocol driver and the controller's flags, and borrows the bus for as long as it
/// lives. Every method blocks until all of its writes went out.
#[derive(Debug)]
pub struct Lcd<'a> {
    driver: Pcf8574Driver<'a>,
    geometry: DisplayGeometry,
    position_policy: PositionPolicy,
    flags: ControllerFlags,
}

impl<'a> Lcd<'a> {
    /// Initializes the display at `config.address` on `bus`.
    ///
    /// Runs the whole cold start sequence, leaving the display on and cleared, with the cursor
    /// hidden at the home position. Fails if any write fails.
    pub fn new(bus: &'a mut dyn I2cBus, config: &LcdConfig) -> LcdResult<Self> {
        debug!(
            "Initializing {}x{} LCD @{:#04x}...",
            config.geometry.columns(),
            config.geometry.rows(),
            config.address
        );

        let flags = ControllerFlags::new(&config.geometry, config.font, config.backlight);
        let mut driver = Pcf8574Driver::new(bus, config.address, config.backlight)
            .with_power_on_delay(config.power_on_delay);

        driver.init()?;
        driver.send_command(flags.function_set())?;
        driver.send_command(flags.display_control())?;
        driver.send_command(flags.entry_mode())?;

        let mut lcd = Lcd {
            driver,
            geometry: config.geometry,
            position_policy: config.position_policy,
            flags,
        };
        lcd.clear()?;
        lcd.home()?;

        debug!("LCD initialized.");
        Ok(lcd)
    }

    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    pub fn flags(&self) -> ControllerFlags {
        self.flags
    }

    /// Blanks the display and moves the cursor home.
    pub fn clear(&mut self) -> LcdResult<()> {
        self.driver.clear_display()?;
        sleep(CLEAR_HOME_DELAY);
        Ok(())
    }

    /// Moves the cursor home and undoes any display shift.
    pub fn home(&mut self) -> LcdResult<()> {
        self.driver.return_home()?;
        sleep(CLEAR_HOME_DELAY);
        Ok(())
    }

    /// Moves the cursor to (`row`, `col`), both counted from zero.
    ///
    /// With [PositionPolicy::ClampRow], a row past the bottom of the display is replaced with the
    /// last row. Columns are always checked.
    pub fn set_cursor(&mut self, row: usize, col: usize) -> LcdResult<()> {
        let last_row = self.geometry.rows() - 1;
        let row = match self.position_policy {
            PositionPolicy::ClampRow if row > last_row && col < self.geometry.columns() => {
                warn!("Row {} is off the display, using row {} instead", row, last_row);
                last_row
            }
            _ => row,
        };
        self.set_position(row, col)
    }

    /// Moves the cursor to (`row`, `col`), failing if either is off the display.
    pub fn set_position(&mut self, row: usize, col: usize) -> LcdResult<()> {
        let address = self
            .geometry
            .ddram_address(row, col)
            .ok_or_else(|| self.invalid_position(row, col))?;
        self.driver.set_ddram_address(address)
    }

    fn invalid_position(&self, row: usize, col: usize) -> LcdError {
        LcdError::InvalidPosition {
            row,
            col,
            rows: self.geometry.rows(),
            columns: self.geometry.columns(),
        }
    }

    /// Writes raw character codes at the cursor.
    pub fn print(&mut self, bytes: &[u8]) -> LcdResult<()> {
        for byte in bytes {
            self.driver.send_data(*byte)?;
        }
        Ok(())
    }

    /// Writes `text` at the cursor. Anything that is not ASCII is shown as `?`.
    pub fn print_str(&mut self, text: &str) -> LcdResult<()> {
        for c in text.chars() {
            if c.is_ascii() {
                self.driver.send_data(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.driver.send_data(b'?')?;
            }
        }
        Ok(())
    }

    /// Lays `text` out over the selected rows and writes it.
    ///
    /// See [layout] for how text is split, truncated and padded. Nothing is written if any
    /// selected row is off the display.
    pub fn show_text(
        &mut self,
        text: &str,
        selection: &RowSelection,
        options: ShowOptions,
    ) -> LcdResult<()> {
        if let Some(row) = selection.last().filter(|row| *row >= self.geometry.rows()) {
            return Err(self.invalid_position(row, 0));
        }

        for line in layout(text, selection, options, &self.geometry) {
            if let Some(row) = line.row {
                self.set_position(row, 0)?;
            }
            self.print_str(&line.text)?;
        }
        Ok(())
    }

    /// Sends a raw instruction byte.
    pub fn command(&mut self, command: u8) -> LcdResult<()> {
        self.driver.send_command(command)
    }

    fn update_display_control(&mut self, flags: ControllerFlags) -> LcdResult<()> {
        self.driver.send_command(flags.display_control())?;
        self.flags = flags;
        Ok(())
    }

    fn update_entry_mode(&mut self, flags: ControllerFlags) -> LcdResult<()> {
        self.driver.send_command(flags.entry_mode())?;
        self.flags = flags;
        Ok(())
    }

    pub fn display_on(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_display(true))
    }

    /// Blanks the display without touching its contents.
    pub fn display_off(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_display(false))
    }

    pub fn cursor_on(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_cursor(true))
    }

    pub fn cursor_off(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_cursor(false))
    }

    pub fn blink_on(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_blink(true))
    }

    pub fn blink_off(&mut self) -> LcdResult<()> {
        self.update_display_control(self.flags.with_blink(false))
    }

    pub fn left_to_right(&mut self) -> LcdResult<()> {
        self.update_entry_mode(self.flags.with_left_to_right(true))
    }

    pub fn right_to_left(&mut self) -> LcdResult<()> {
        self.update_entry_mode(self.flags.with_left_to_right(false))
    }

    /// Shifts the whole display on every character written, keeping the cursor in place.
    pub fn autoscroll(&mut self) -> LcdResult<()> {
        self.update_entry_mode(self.flags.with_autoscroll(true))
    }

    pub fn no_autoscroll(&mut self) -> LcdResult<()> {
        self.update_entry_mode(self.flags.with_autoscroll(false))
    }

    /// Shifts the contents of every row one cell to the left.
    pub fn scroll_display_left(&mut self) -> LcdResult<()> {
        self.driver.cursor_shift(true, CursorDirection::Left)
    }

    /// Shifts the contents of every row one cell to the right.
    pub fn scroll_display_right(&mut self) -> LcdResult<()> {
        self.driver.cursor_shift(true, CursorDirection::Right)
    }

    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        self.driver.set_backlight(on)?;
        self.flags = self.flags.with_backlight(on);
        Ok(())
    }

    /// Stores a custom character in CGRAM slot `slot` (0–7, higher bits are ignored). It then shows
    /// wherever character code `slot` is printed.
    ///
    /// `bitmap` is 8 rows for the 5×8 font or 11 rows for the 5×10 font.
    ///
    /// The cursor is left inside CGRAM: move it with [Lcd::set_cursor], [Lcd::set_position],
    /// [Lcd::home] or [Lcd::clear] before printing again.
    pub fn upload_glyph(&mut self, slot: u8, bitmap: &[u8]) -> LcdResult<()> {
        self.upload(slot, &Glyph::new(bitmap)?)
    }

    /// Like [Lcd::upload_glyph], for an already validated [Glyph].
    pub fn upload(&mut self, slot: u8, glyph: &Glyph) -> LcdResult<()> {
        let slot = slot % GLYPH_SLOTS;
        if glyph.is_tall() != self.flags.tall_font() {
            warn!(
                "Uploading a {} glyph while the display uses the {} font",
                if glyph.is_tall() { "5x10" } else { "5x8" },
                if self.flags.tall_font() { "5x10" } else { "5x8" }
            );
        }

        debug!("Uploading glyph to slot {}", slot);
        self.driver.set_cgram_address(slot << 3)?;
        self.print(glyph.rows())
    }
}

impl std::fmt::Write for Lcd<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.print_str(s).map_err(|_| std::fmt::Error)
    }
}
