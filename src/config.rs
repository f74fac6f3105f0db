//! Command-line options and the validated desktop configuration built from
//! them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DOUBLE_CLICK_WINDOW, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH, RESERVED_BOTTOM,
};
use crate::desktop::CellScale;
use crate::error::ConfigError;
use crate::geometry::{GeometryPolicy, Size};

#[derive(Debug, Clone, Parser)]
#[command(name = "viewport-wm", version, about = "Overlapping windows in the terminal")]
pub struct Cli {
    /// Smallest window width, in pixels.
    #[arg(long, default_value_t = MIN_WINDOW_WIDTH)]
    pub min_width: i32,
    /// Smallest window height, in pixels.
    #[arg(long, default_value_t = MIN_WINDOW_HEIGHT)]
    pub min_height: i32,
    /// Pixels kept free for the bottom bar when maximizing.
    #[arg(long, default_value_t = RESERVED_BOTTOM, allow_negative_numbers = true)]
    pub reserved_bottom: i32,
    /// Pixels per terminal column.
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: i32,
    /// Pixels per terminal row.
    #[arg(long, default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: i32,
    /// Write logs here instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// One of error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub policy: GeometryPolicy,
    pub scale: CellScale,
    pub double_click: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            policy: GeometryPolicy::default(),
            scale: CellScale::default(),
            double_click: DOUBLE_CLICK_WINDOW,
            log_file: None,
            log_level: Level::INFO,
        }
    }
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.min_width < 1 || cli.min_height < 1 {
            return Err(ConfigError::MinSize {
                width: cli.min_width,
                height: cli.min_height,
            });
        }
        if cli.reserved_bottom < 0 {
            return Err(ConfigError::ReservedBottom(cli.reserved_bottom));
        }
        if cli.cell_width < 1 || cli.cell_height < 1 {
            return Err(ConfigError::CellScale {
                width: cli.cell_width,
                height: cli.cell_height,
            });
        }
        let log_level = cli
            .log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;

        Ok(Self {
            policy: GeometryPolicy {
                min_size: Size::new(cli.min_width, cli.min_height),
                reserved_bottom: cli.reserved_bottom,
            },
            scale: CellScale {
                cell_width: cli.cell_width,
                cell_height: cli.cell_height,
            },
            double_click: DOUBLE_CLICK_WINDOW,
            log_file: cli.log_file.clone(),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("viewport-wm").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_policy_constants() {
        let config = DesktopConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.policy.min_size, Size::new(320, 240));
        assert_eq!(config.policy.reserved_bottom, 64);
    }

    #[test]
    fn flags_override_policy() {
        let cli = parse(&[
            "--min-width",
            "100",
            "--min-height",
            "80",
            "--reserved-bottom",
            "0",
            "--cell-width",
            "10",
            "--cell-height",
            "20",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/wm.log",
        ]);
        let config = DesktopConfig::try_from(&cli).unwrap();
        assert_eq!(config.policy.min_size, Size::new(100, 80));
        assert_eq!(config.policy.reserved_bottom, 0);
        assert_eq!(config.scale.cell_width, 10);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/wm.log")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = DesktopConfig::try_from(&parse(&["--min-width", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::MinSize { width: 0, height: 240 });

        let err = DesktopConfig::try_from(&parse(&["--reserved-bottom", "-1"])).unwrap_err();
        assert_eq!(err, ConfigError::ReservedBottom(-1));

        let err = DesktopConfig::try_from(&parse(&["--cell-height", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::CellScale { width: 8, height: 0 });

        let err = DesktopConfig::try_from(&parse(&["--log-level", "loud"])).unwrap_err();
        assert_eq!(err, ConfigError::LogLevel("loud".to_string()));
    }
}
