use crate::BusError;
use crate::bus::I2cBus;
use crate::lcd::DisplayGeometry;
use crate::lcd::hd44780::{EXPANDER_ENABLE, EXPANDER_RS, EXPANDER_RW, EXPANDER_BACKLIGHT};
use log::trace;
use std::fmt::{Debug, Formatter};
use std::time::Instant;

const DDRAM_LINE_LENGTH: usize = 40;

/// A single write seen by the [VirtualLcd].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub at: Instant,
    pub bytes: Vec<u8>,
}

/// A byte latched by the virtual controller, after nibble reassembly.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transfer {
    /// Latched with RS low.
    Command(u8),
    /// Latched with RS high.
    Data(u8),
}

/// A software model of a PCF8574 backpack with an HD44780 behind it.
///
/// Every byte written to it is treated as the new state of the expander's output pins. A falling
/// edge on the enable pin latches the data nibble (P4–P7) into the controller, exactly as the real
/// chip does, so the model only shows sensible contents when the driver gets the strobe discipline
/// right. The controller starts in 8-bit mode, as after power-on.
///
/// Apart from the decoded controller state (DDRAM, CGRAM, flags), every transaction and every
/// latched byte is recorded for inspection.
pub struct VirtualLcd {
    address: u16,
    fail_after: Option<usize>,

    transactions: Vec<Transaction>,
    transfers: Vec<Transfer>,

    pins: u8,
    four_bit: bool,
    pending_high_nibble: Option<(u8, bool)>,

    ddram: [u8; 128],
    cgram: [u8; 64],
    address_counter: u8,
    in_cgram: bool,
    increment: bool,
    display_shift_on_write: bool,
    display_control: u8,
    function_set: u8,
    display_shift: i32,
}

impl VirtualLcd {
    /// Creates a virtual display answering at `address`. Writes to any other address are not
    /// acknowledged.
    pub fn new(address: u16) -> Self {
        VirtualLcd {
            address,
            fail_after: None,
            transactions: Vec::new(),
            transfers: Vec::new(),
            pins: 0,
            four_bit: false,
            pending_high_nibble: None,
            ddram: [b' '; 128],
            cgram: [0; 64],
            address_counter: 0,
            in_cgram: false,
            increment: true,
            display_shift_on_write: false,
            display_control: 0,
            function_set: 0b0011_0000,
            display_shift: 0,
        }
    }

    /// Makes every transaction after the first `successful` ones fail with
    /// [BusError::NoAcknowledge]. Counts from the transactions already recorded.
    pub fn fail_after(&mut self, successful: usize) {
        self.fail_after = Some(self.transactions.len() + successful);
    }

    /// Stops injecting failures.
    pub fn heal(&mut self) {
        self.fail_after = None;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Forgets the recorded transactions and transfers. Controller state is kept.
    pub fn clear_log(&mut self) {
        self.transactions.clear();
        self.transfers.clear();
    }

    pub fn backlight(&self) -> bool {
        self.pins & EXPANDER_BACKLIGHT != 0
    }

    pub fn is_four_bit(&self) -> bool {
        self.four_bit
    }

    pub fn display_on(&self) -> bool {
        self.display_control & 0b0000_0100 != 0
    }

    pub fn cursor_on(&self) -> bool {
        self.display_control & 0b0000_0010 != 0
    }

    pub fn blink_on(&self) -> bool {
        self.display_control & 0b0000_0001 != 0
    }

    pub fn increments(&self) -> bool {
        self.increment
    }

    pub fn shifts_on_write(&self) -> bool {
        self.display_shift_on_write
    }

    pub fn two_lines(&self) -> bool {
        self.function_set & 0b0000_1000 != 0
    }

    pub fn tall_font(&self) -> bool {
        self.function_set & 0b0000_0100 != 0
    }

    /// The current address counter, and whether it points into CGRAM.
    pub fn address_counter(&self) -> (u8, bool) {
        (self.address_counter, self.in_cgram)
    }

    pub fn cgram(&self) -> &[u8; 64] {
        &self.cgram
    }

    pub fn ddram(&self) -> &[u8; 128] {
        &self.ddram
    }

    /// Bytes currently visible on `row`, taking the display shift into account.
    pub fn row_bytes(&self, geometry: &DisplayGeometry, row: usize) -> Option<Vec<u8>> {
        let offset = *geometry.row_offsets().get(row)? as usize;
        let line_base = offset & 0x40;
        let start = offset & 0x3F;

        Some(
            (0..geometry.columns())
                .map(|col| {
                    let index = (start as i32 + col as i32 + self.display_shift)
                        .rem_euclid(DDRAM_LINE_LENGTH as i32) as usize;
                    self.ddram[line_base + index]
                })
                .collect(),
        )
    }

    /// Text currently visible on `row`. Bytes outside printable ASCII show as `·`.
    pub fn row_text(&self, geometry: &DisplayGeometry, row: usize) -> Option<String> {
        self.row_bytes(geometry, row).map(|bytes| {
            bytes
                .into_iter()
                .map(|byte| match byte {
                    0x20..=0x7E => byte as char,
                    _ => '·',
                })
                .collect()
        })
    }

    /// Every row of the display, top to bottom.
    pub fn screen(&self, geometry: &DisplayGeometry) -> Vec<String> {
        (0..geometry.rows())
            .filter_map(|row| self.row_text(geometry, row))
            .collect()
    }

    fn set_pins(&mut self, pins: u8) {
        let falling_edge = self.pins & EXPANDER_ENABLE != 0 && pins & EXPANDER_ENABLE == 0;
        let latched = self.pins;
        self.pins = pins;

        if falling_edge && latched & EXPANDER_RW == 0 {
            self.latch(latched >> 4, latched & EXPANDER_RS != 0);
        }
    }

    fn latch(&mut self, nibble: u8, rs: bool) {
        if !self.four_bit {
            // Only D4-D7 are wired, so D0-D3 read as low.
            self.execute(nibble << 4, rs);
            return;
        }

        match self.pending_high_nibble.take() {
            None => self.pending_high_nibble = Some((nibble, rs)),
            Some((high, _)) => self.execute(high << 4 | nibble, rs),
        }
    }

    fn execute(&mut self, byte: u8, rs: bool) {
        if rs {
            trace!("Virtual LCD data: {:#04x}", byte);
            self.transfers.push(Transfer::Data(byte));
            self.write_data(byte);
            return;
        }

        trace!("Virtual LCD command: {:08b}", byte);
        self.transfers.push(Transfer::Command(byte));

        match byte {
            0x80..=0xFF => {
                self.address_counter = byte & 0x7F;
                self.in_cgram = false;
            }
            0x40..=0x7F => {
                self.address_counter = byte & 0x3F;
                self.in_cgram = true;
            }
            0x20..=0x3F => {
                self.function_set = byte;
                self.four_bit = byte & 0b0001_0000 == 0;
                self.pending_high_nibble = None;
            }
            0x10..=0x1F => {
                let right = byte & 0b0000_0100 != 0;
                if byte & 0b0000_1000 != 0 {
                    self.display_shift += if right { -1 } else { 1 };
                } else {
                    self.step_address(right);
                }
            }
            0x08..=0x0F => self.display_control = byte,
            0x04..=0x07 => {
                self.increment = byte & 0b0000_0010 != 0;
                self.display_shift_on_write = byte & 0b0000_0001 != 0;
            }
            0x02..=0x03 => {
                self.address_counter = 0;
                self.in_cgram = false;
                self.display_shift = 0;
            }
            0x01 => {
                self.ddram = [b' '; 128];
                self.address_counter = 0;
                self.in_cgram = false;
                self.increment = true;
                self.display_shift = 0;
            }
            0x00 => {}
        }
    }

    fn write_data(&mut self, byte: u8) {
        if self.in_cgram {
            self.cgram[(self.address_counter & 0x3F) as usize] = byte;
        } else {
            self.ddram[(self.address_counter & 0x7F) as usize] = byte;
            if self.display_shift_on_write {
                self.display_shift += if self.increment { 1 } else { -1 };
            }
        }
        self.step_address(self.increment);
    }

    fn step_address(&mut self, forward: bool) {
        let mask = if self.in_cgram { 0x3F } else { 0x7F };
        self.address_counter = if forward {
            self.address_counter.wrapping_add(1) & mask
        } else {
            self.address_counter.wrapping_sub(1) & mask
        };
    }
}

impl Default for VirtualLcd {
    fn default() -> Self {
        VirtualLcd::new(0x27)
    }
}

impl Debug for VirtualLcd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VirtualLcd(@{:#04x}, {} transactions, {}-bit)",
            self.address,
            self.transactions.len(),
            if self.four_bit { 4 } else { 8 }
        )
    }
}

impl I2cBus for VirtualLcd {
    fn transmit(&mut self, address: u16, bytes: &[u8]) -> Result<(), BusError> {
        if address != self.address {
            return Err(BusError::NoAcknowledge);
        }

        if self.fail_after.is_some_and(|limit| self.transactions.len() >= limit) {
            return Err(BusError::NoAcknowledge);
        }

        self.transactions.push(Transaction {
            at: Instant::now(),
            bytes: bytes.to_vec(),
        });

        for &byte in bytes {
            self.set_pins(byte);
        }

        Ok(())
    }
}
