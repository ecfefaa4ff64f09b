use crate::lcd::DisplayGeometry;
use crate::lcd::hd44780::driver::DEFAULT_POWER_ON_DELAY;
use std::time::Duration;

/// Default address of a PCF8574 backpack with all address jumpers open.
pub const DEFAULT_ADDRESS: u16 = 0x27;

/// Character font. The 5×10 font only exists for single-line displays; on anything taller the
/// controller ignores it and so does [crate::lcd::Lcd].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Font {
    #[default]
    Dots5x8,
    Dots5x10,
}

/// What [crate::lcd::Lcd::set_cursor] does with a row past the bottom of the display.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionPolicy {
    /// Fail with [crate::LcdError::InvalidPosition].
    #[default]
    Reject,
    /// Move to the last row instead. Columns are still checked.
    ClampRow,
}

/// Everything needed to bring up an [crate::lcd::Lcd].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LcdConfig {
    pub geometry: DisplayGeometry,
    /// 7-bit I2C address of the expander.
    pub address: u16,
    pub font: Font,
    pub position_policy: PositionPolicy,
    /// Backlight state right after initialization.
    pub backlight: bool,
    /// Wait before the first write, giving the controller time to power up (40 ms minimum).
    pub power_on_delay: Duration,
}

impl LcdConfig {
    pub fn with_geometry(mut self, geometry: DisplayGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_position_policy(mut self, position_policy: PositionPolicy) -> Self {
        self.position_policy = position_policy;
        self
    }

    pub fn with_backlight(mut self, backlight: bool) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn with_power_on_delay(mut self, power_on_delay: Duration) -> Self {
        self.power_on_delay = power_on_delay;
        self
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        LcdConfig {
            geometry: DisplayGeometry::lcd_16x2(),
            address: DEFAULT_ADDRESS,
            font: Font::default(),
            position_policy: PositionPolicy::default(),
            backlight: true,
            power_on_delay: DEFAULT_POWER_ON_DELAY,
        }
    }
}
