use crate::{LcdError, LcdResult};

/// Number of CGRAM slots for custom characters.
pub const GLYPH_SLOTS: u8 = 8;

/// A custom character bitmap, one byte per pixel row with the lowest five bits used.
///
/// 8 rows for the 5×8 font, 11 rows for the 5×10 font.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Glyph {
    rows: Vec<u8>,
}

impl Glyph {
    pub fn new(rows: &[u8]) -> LcdResult<Self> {
        if rows.len() != 8 && rows.len() != 11 {
            return Err(LcdError::InvalidArgument("glyph must have 8 or 11 rows"));
        }
        Ok(Glyph {
            rows: rows.iter().map(|row| row & 0x1F).collect(),
        })
    }

    /// Like [Glyph::new], but shorter patterns are padded with blank rows up to 8.
    pub fn padded(rows: &[u8]) -> LcdResult<Self> {
        if rows.len() >= 8 {
            return Glyph::new(rows);
        }
        let mut padded = [0; 8];
        padded[..rows.len()].copy_from_slice(rows);
        Glyph::new(&padded)
    }

    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    /// Whether this is a 5×10 glyph.
    pub fn is_tall(&self) -> bool {
        self.rows.len() == 11
    }
}

impl From<[u8; 8]> for Glyph {
    fn from(rows: [u8; 8]) -> Self {
        Glyph {
            rows: rows.iter().map(|row| row & 0x1F).collect(),
        }
    }
}

/// Ready-made 5×8 glyphs.
pub mod stock {
    pub const BELL: [u8; 8] = [0x04, 0x0E, 0x0E, 0x0E, 0x1F, 0x00, 0x04, 0x00];
    pub const NOTE: [u8; 8] = [0x02, 0x03, 0x02, 0x0E, 0x1E, 0x0C, 0x00, 0x00];
    pub const CLOCK: [u8; 8] = [0x00, 0x0E, 0x15, 0x17, 0x11, 0x0E, 0x00, 0x00];
    pub const HEART: [u8; 8] = [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00];
    pub const DUCK: [u8; 8] = [0x00, 0x0C, 0x1D, 0x0F, 0x0F, 0x06, 0x00, 0x00];
    pub const CHECK: [u8; 8] = [0x00, 0x01, 0x03, 0x16, 0x1C, 0x08, 0x00, 0x00];
    pub const CROSS: [u8; 8] = [0x00, 0x1B, 0x0E, 0x04, 0x0E, 0x1B, 0x00, 0x00];
    pub const RETURN_ARROW: [u8; 8] = [0x01, 0x01, 0x05, 0x09, 0x1F, 0x08, 0x04, 0x00];
    pub const DEGREE: [u8; 8] = [0x06, 0x09, 0x09, 0x06, 0x00, 0x00, 0x00, 0x00];
    pub const LOCK: [u8; 8] = [0x0E, 0x11, 0x11, 0x1F, 0x1B, 0x1B, 0x1F, 0x00];
    pub const UP_ARROW: [u8; 8] = [0x04, 0x0E, 0x15, 0x04, 0x04, 0x04, 0x04, 0x00];
    pub const SPEAKER: [u8; 8] = [0x01, 0x03, 0x0F, 0x0F, 0x0F, 0x03, 0x01, 0x00];

    /// Every stock glyph, with a name.
    pub const ALL: [(&str, [u8; 8]); 12] = [
        ("bell", BELL),
        ("note", NOTE),
        ("clock", CLOCK),
        ("heart", HEART),
        ("duck", DUCK),
        ("check", CHECK),
        ("cross", CROSS),
        ("return arrow", RETURN_ARROW),
        ("degree", DEGREE),
        ("lock", LOCK),
        ("up arrow", UP_ARROW),
        ("speaker", SPEAKER),
    ];
}
