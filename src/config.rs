//! Command-line flags and the validated runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::background::BackgroundStyle;
use crate::color::Rgb;
use crate::error::{FireworksError, Result};

#[derive(Parser, Debug)]
#[command(name = "termfireworks")]
#[command(about = "Fireworks in your terminal", long_about = None)]
#[command(version)]
#[command(after_help = "Click to fire sparks, drag to trail them, release to explode.\nPress 'q', ESC, or Ctrl+C to exit")]
pub struct Cli {
    /// Background color as hex (e.g. 1a1b26)
    #[arg(long, value_name = "RRGGBB", default_value = "000000")]
    pub bg_color: String,

    /// Frame period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 30)]
    pub tick_ms: u64,

    /// Logical pixels per half-block cell
    #[arg(long, default_value_t = 4)]
    pub scale: usize,

    /// Interval between automatic launch attempts in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1500)]
    pub auto_interval_ms: u64,

    /// Probability that an automatic launch attempt fires a rocket
    #[arg(long, value_name = "P", default_value_t = 0.75)]
    pub auto_chance: f64,

    /// Disable automatic rockets
    #[arg(long)]
    pub no_auto: bool,

    /// Paint a faint haze above the horizon
    #[arg(long)]
    pub haze: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoSpawn {
    pub interval: Duration,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub background: BackgroundStyle,
    pub tick: Duration,
    pub scale: usize,
    pub auto_spawn: Option<AutoSpawn>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: BackgroundStyle::default(),
            tick: Duration::from_millis(30),
            scale: 4,
            auto_spawn: Some(AutoSpawn {
                interval: Duration::from_millis(1500),
                chance: 0.75,
            }),
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.tick_ms == 0 {
            return Err(FireworksError::InvalidConfig(
                "--tick-ms must be at least 1".to_string(),
            ));
        }
        if cli.scale == 0 {
            return Err(FireworksError::InvalidConfig(
                "--scale must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&cli.auto_chance) {
            return Err(FireworksError::InvalidConfig(format!(
                "--auto-chance must be within 0..1, got {}",
                cli.auto_chance
            )));
        }

        let auto_spawn = if cli.no_auto {
            None
        } else {
            if cli.auto_interval_ms == 0 {
                return Err(FireworksError::InvalidConfig(
                    "--auto-interval-ms must be at least 1".to_string(),
                ));
            }
            Some(AutoSpawn {
                interval: Duration::from_millis(cli.auto_interval_ms),
                chance: cli.auto_chance,
            })
        };

        Ok(Self {
            background: BackgroundStyle {
                color: parse_hex_color(&cli.bg_color)?,
                haze: cli.haze,
            },
            tick: Duration::from_millis(cli.tick_ms),
            scale: cli.scale,
            auto_spawn,
        })
    }
}

pub fn parse_hex_color(hex: &str) -> Result<Rgb> {
    let invalid = || FireworksError::InvalidColor(hex.to_string());
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["termfireworks"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults_match_config_default() {
        let config = Config::from_cli(&cli(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("1a1b26").unwrap(), (0x1a, 0x1b, 0x26));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), (255, 255, 255));
        assert!(matches!(
            parse_hex_color("12345"),
            Err(FireworksError::InvalidColor(_))
        ));
        assert!(parse_hex_color("gg0000").is_err());
        assert!(parse_hex_color("ääää").is_err());
    }

    #[test]
    fn test_flags() {
        let config = Config::from_cli(&cli(&[
            "--bg-color",
            "102030",
            "--tick-ms",
            "16",
            "--scale",
            "2",
            "--no-auto",
            "--haze",
        ]))
        .unwrap();
        assert_eq!(config.background.color, (0x10, 0x20, 0x30));
        assert!(config.background.haze);
        assert_eq!(config.tick, Duration::from_millis(16));
        assert_eq!(config.scale, 2);
        assert_eq!(config.auto_spawn, None);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Config::from_cli(&cli(&["--scale", "0"])).is_err());
        assert!(Config::from_cli(&cli(&["--tick-ms", "0"])).is_err());
        assert!(Config::from_cli(&cli(&["--auto-chance", "1.5"])).is_err());
        assert!(Config::from_cli(&cli(&["--bg-color", "nope"])).is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        let parsed = cli(&["-vv", "--log-file", "/tmp/fw.log"]);
        assert_eq!(parsed.verbose, 2);
        assert_eq!(parsed.log_file, Some(PathBuf::from("/tmp/fw.log")));
    }
}
