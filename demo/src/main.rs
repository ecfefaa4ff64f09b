mod config;

use crate::config::DemoConfig;
use dotenv::dotenv;
use lcdi2c_driver::bus::VirtualLcd;
use lcdi2c_driver::lcd::glyph::{GLYPH_SLOTS, Glyph, stock};
use lcdi2c_driver::lcd::{DisplayGeometry, Lcd, RowSelection, ShowOptions};
use log::{debug, info};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;
use std::thread::sleep;
use std::time::Duration;
use sysinfo::System;
use time::OffsetDateTime;

const UNKNOWN_STR: &str = "???";

fn log_screen(screen: &RefCell<VirtualLcd>, geometry: &DisplayGeometry, step: &str) {
    let screen = screen.borrow();
    info!("{} (backlight {}):", step, if screen.backlight() { "on" } else { "off" });
    for line in screen.screen(geometry) {
        info!("|{}|", line);
    }
}

fn main() -> eyre::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    info!("lcdi2c demo starting...");

    let mut config = DemoConfig::load_or_create(&DemoConfig::path())?;
    config.apply_env()?;
    debug!("{:?}", config);

    let geometry = config.lcd.geometry;
    let step = Duration::from_millis(config.step_millis);
    let last_row = geometry.rows() - 1;

    let screen = Rc::new(RefCell::new(VirtualLcd::new(config.lcd.address)));
    let mut bus = screen.clone();
    let mut lcd = Lcd::new(&mut bus, &config.lcd)?;

    // Greeting
    let host_name = System::host_name();
    lcd.show_text(
        &format!("Hello, {}!", host_name.as_deref().unwrap_or(UNKNOWN_STR)),
        &RowSelection::all(&geometry),
        ShowOptions::ellipsis().with_blank_pad(true),
    )?;
    log_screen(&screen, &geometry, "Greeting");
    sleep(step);

    // Backlight, cursor and blink
    lcd.set_backlight(false)?;
    log_screen(&screen, &geometry, "Backlight off");
    sleep(step);
    lcd.set_backlight(true)?;

    lcd.set_cursor(last_row, 0)?;
    lcd.cursor_on()?;
    sleep(step);
    lcd.blink_on()?;
    sleep(step);
    debug!("{:?}", lcd.flags());
    lcd.blink_off()?;
    lcd.cursor_off()?;

    // Custom characters
    let last_slot = GLYPH_SLOTS - 1;
    for (slot, (name, rows)) in stock::ALL.iter().take(last_slot as usize).enumerate() {
        debug!("Glyph {} -> slot {}", name, slot);
        lcd.upload(slot as u8, &Glyph::from(*rows))?;
    }
    // Smiley, drawn in six rows
    lcd.upload(last_slot, &Glyph::padded(&[0x00, 0x0A, 0x0A, 0x00, 0x11, 0x0E])?)?;
    lcd.clear()?;
    lcd.print_str("Glyphs: ")?;
    lcd.print(&(0..GLYPH_SLOTS).collect::<Vec<_>>())?;
    log_screen(&screen, &geometry, "Glyphs");
    sleep(step);

    // Autoscrolling counter
    lcd.clear()?;
    lcd.set_cursor(0, geometry.columns() - 1)?;
    lcd.autoscroll()?;
    for i in 0..config.counter_steps {
        write!(lcd, "{}", i % 10)?;
        sleep(step / 4);
    }
    lcd.no_autoscroll()?;
    log_screen(&screen, &geometry, "Autoscroll");

    // Display shift
    lcd.clear()?;
    lcd.print_str("<- scrolling")?;
    for _ in 0..geometry.columns() / 2 {
        lcd.scroll_display_right()?;
        sleep(step / 4);
    }
    log_screen(&screen, &geometry, "Scrolled");
    lcd.home()?;

    // Clock
    lcd.clear()?;
    lcd.show_text("Local time", &RowSelection::row(0), ShowOptions::blank_pad())?;
    for _ in 0..config.clock_ticks {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let line = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
        lcd.show_text(&line, &RowSelection::row(last_row), ShowOptions::blank_pad())?;
        log_screen(&screen, &geometry, "Clock");
        sleep(Duration::from_secs(1));
    }

    lcd.display_off()?;
    lcd.set_backlight(false)?;
    info!(
        "Done, {} bus transactions in total.",
        screen.borrow().transactions().len()
    );

    Ok(())
}
