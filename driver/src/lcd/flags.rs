use crate::lcd::hd44780::{
    BLINK_ON, CURSOR_ON, DISPLAY_CONTROL, DISPLAY_ON, DOTS_5X10, ENTRY_INCREMENT, ENTRY_MODE_SET,
    ENTRY_SHIFT, FUNCTION_SET, TWO_LINES,
};
use crate::lcd::{DisplayGeometry, Font};

fn with_bit(byte: u8, mask: u8, on: bool) -> u8 {
    if on { byte | mask } else { byte & !mask }
}

/// The controller's write-only registers, as last sent.
///
/// The controller cannot be asked for its flags over a write-only backpack, so they are tracked
/// here. Values are never modified in place: every `with_*` method returns a new value, which the
/// owner swaps in once the matching command went through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ControllerFlags {
    entry_mode: u8,
    display_control: u8,
    function_set: u8,
    backlight: bool,
}

impl ControllerFlags {
    /// Flags after a cold start: 4-bit interface, display on, cursor and blink off, left to right
    /// without shifting.
    pub fn new(geometry: &DisplayGeometry, font: Font, backlight: bool) -> Self {
        let mut function_set = FUNCTION_SET;
        if geometry.rows() > 1 {
            function_set |= TWO_LINES;
        } else if font == Font::Dots5x10 {
            function_set |= DOTS_5X10;
        }

        ControllerFlags {
            entry_mode: ENTRY_MODE_SET | ENTRY_INCREMENT,
            display_control: DISPLAY_CONTROL | DISPLAY_ON,
            function_set,
            backlight,
        }
    }

    /// The full `ENTRY_MODE_SET` command.
    pub fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    /// The full `DISPLAY_CONTROL` command.
    pub fn display_control(&self) -> u8 {
        self.display_control
    }

    /// The full `FUNCTION_SET` command.
    pub fn function_set(&self) -> u8 {
        self.function_set
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    pub fn display_on(&self) -> bool {
        self.display_control & DISPLAY_ON != 0
    }

    pub fn cursor_on(&self) -> bool {
        self.display_control & CURSOR_ON != 0
    }

    pub fn blink_on(&self) -> bool {
        self.display_control & BLINK_ON != 0
    }

    /// Whether the 5×10 font is selected.
    pub fn tall_font(&self) -> bool {
        self.function_set & DOTS_5X10 != 0
    }

    pub fn left_to_right(&self) -> bool {
        self.entry_mode & ENTRY_INCREMENT != 0
    }

    pub fn autoscroll(&self) -> bool {
        self.entry_mode & ENTRY_SHIFT != 0
    }

    pub fn with_display(self, on: bool) -> Self {
        ControllerFlags {
            display_control: with_bit(self.display_control, DISPLAY_ON, on),
            ..self
        }
    }

    pub fn with_cursor(self, on: bool) -> Self {
        ControllerFlags {
            display_control: with_bit(self.display_control, CURSOR_ON, on),
            ..self
        }
    }

    pub fn with_blink(self, on: bool) -> Self {
        ControllerFlags {
            display_control: with_bit(self.display_control, BLINK_ON, on),
            ..self
        }
    }

    pub fn with_left_to_right(self, on: bool) -> Self {
        ControllerFlags {
            entry_mode: with_bit(self.entry_mode, ENTRY_INCREMENT, on),
            ..self
        }
    }

    pub fn with_autoscroll(self, on: bool) -> Self {
        ControllerFlags {
            entry_mode: with_bit(self.entry_mode, ENTRY_SHIFT, on),
            ..self
        }
    }

    pub fn with_backlight(self, on: bool) -> Self {
        ControllerFlags {
            backlight: on,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_flags() {
        let flags = ControllerFlags::new(&DisplayGeometry::lcd_16x2(), Font::Dots5x8, true);
        assert_eq!(flags.function_set(), 0x28);
        assert_eq!(flags.display_control(), 0x0C);
        assert_eq!(flags.entry_mode(), 0x06);
        assert!(flags.backlight());
        assert!(flags.display_on());
        assert!(!flags.cursor_on());
        assert!(!flags.blink_on());
        assert!(flags.left_to_right());
        assert!(!flags.autoscroll());
    }

    #[test]
    fn tall_font_only_on_single_line_displays() {
        let two_rows = ControllerFlags::new(&DisplayGeometry::lcd_16x2(), Font::Dots5x10, true);
        assert_eq!(two_rows.function_set(), 0x28);

        let one_row = DisplayGeometry::new(16, 1).unwrap();
        assert_eq!(ControllerFlags::new(&one_row, Font::Dots5x10, true).function_set(), 0x24);
        assert!(ControllerFlags::new(&one_row, Font::Dots5x10, true).tall_font());
        assert!(!two_rows.tall_font());
        assert_eq!(ControllerFlags::new(&one_row, Font::Dots5x8, true).function_set(), 0x20);
    }

    #[test]
    fn with_methods_leave_the_original_alone() {
        let flags = ControllerFlags::new(&DisplayGeometry::lcd_20x4(), Font::Dots5x8, true);
        let cursor = flags.with_cursor(true);

        assert!(!flags.cursor_on());
        assert_eq!(cursor.display_control(), 0x0E);
        assert_eq!(cursor.with_cursor(true), cursor);
        assert_eq!(cursor.with_cursor(false), flags);
    }

    #[test]
    fn each_with_method_touches_one_bit() {
        let flags = ControllerFlags::new(&DisplayGeometry::lcd_16x2(), Font::Dots5x8, true);

        assert_eq!(flags.with_blink(true).display_control(), 0x0D);
        assert_eq!(flags.with_display(false).display_control(), 0x08);
        assert_eq!(flags.with_left_to_right(false).entry_mode(), 0x04);
        assert_eq!(flags.with_autoscroll(true).entry_mode(), 0x07);
        assert!(!flags.with_backlight(false).backlight());
        assert_eq!(flags.with_backlight(false).display_control(), flags.display_control());
    }
}
