use dotenv::var;
use eyre::{WrapErr, eyre};
use lcdi2c_driver::lcd::{DisplayGeometry, LcdConfig};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct DemoConfig {
    pub lcd: LcdConfig,
    /// Pause between demo steps.
    pub step_millis: u64,
    /// Digits written while autoscrolling.
    pub counter_steps: u32,
    /// Seconds the clock runs for.
    pub clock_ticks: u32,
}

impl DemoConfig {
    /// `CONFIG_FILE`, or `config.json` in the working directory.
    pub fn path() -> PathBuf {
        var("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }

    /// Reads the configuration at `path`. A missing file is `None`, a malformed one an error.
    pub fn load(path: &Path) -> eyre::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| format!("malformed configuration in {}", path.display()))?;
        Ok(Some(config))
    }

    /// Reads the configuration at `path`, writing the defaults there first if there is none.
    pub fn load_or_create(path: &Path) -> eyre::Result<Self> {
        if let Some(config) = Self::load(path)? {
            return Ok(config);
        }
        let config = DemoConfig::default();
        config.save(path)?;
        info!("Wrote default configuration to {}.", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        let file = File::create(path).wrap_err_with(|| format!("cannot create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Applies `LCDI2C_ADDRESS`, `LCDI2C_COLUMNS` and `LCDI2C_ROWS` on top of the file.
    pub fn apply_env(&mut self) -> eyre::Result<()> {
        if let Ok(address) = var("LCDI2C_ADDRESS") {
            self.lcd.address = parse_address(&address)?;
        }

        let columns = match var("LCDI2C_COLUMNS") {
            Ok(columns) => columns.trim().parse()?,
            Err(_) => self.lcd.geometry.columns(),
        };
        let rows = match var("LCDI2C_ROWS") {
            Ok(rows) => rows.trim().parse()?,
            Err(_) => self.lcd.geometry.rows(),
        };
        self.lcd.geometry = DisplayGeometry::new(columns, rows)?;

        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            lcd: LcdConfig::default(),
            step_millis: 750,
            counter_steps: 24,
            clock_ticks: 5,
        }
    }
}

/// Parses `0x27`-style hex or plain decimal.
fn parse_address(address: &str) -> eyre::Result<u16> {
    let address = address.trim();
    let parsed = match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16)?,
        None => address.parse()?,
    };
    if parsed > 0x7F {
        return Err(eyre!("I2C address {:#x} does not fit in 7 bits", parsed));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_addresses() {
        assert_eq!(parse_address("0x27").unwrap(), 0x27);
        assert_eq!(parse_address(" 0X3f ").unwrap(), 0x3F);
        assert_eq!(parse_address("39").unwrap(), 0x27);
        assert!(parse_address("0x80").is_err());
        assert!(parse_address("lcd").is_err());
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: DemoConfig =
            serde_json::from_str(r#"{ "lcd": { "geometry": { "columns": 20, "rows": 4 } }, "clock_ticks": 2 }"#)
                .unwrap();

        assert_eq!(config.lcd.geometry, DisplayGeometry::lcd_20x4());
        assert_eq!(config.lcd.address, 0x27);
        assert_eq!(config.clock_ticks, 2);
        assert_eq!(config.step_millis, 750);
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lcdi2c_demo_{}_{}.json", std::process::id(), name))
    }

    #[test]
    fn creates_defaults_when_missing() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);

        assert!(DemoConfig::load(&path).unwrap().is_none());
        let created = DemoConfig::load_or_create(&path).unwrap();
        let loaded = DemoConfig::load(&path).unwrap().unwrap();

        assert_eq!(loaded.lcd, created.lcd);
        assert_eq!(loaded.step_millis, created.step_millis);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = scratch_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(DemoConfig::load(&path).is_err());
        assert!(DemoConfig::load_or_create(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unsupported_geometry_is_rejected_on_load() {
        let result: Result<DemoConfig, _> =
            serde_json::from_str(r#"{ "lcd": { "geometry": { "columns": 16, "rows": 4 } } }"#);
        assert!(result.is_err());
    }
}
