//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use adcscope_messages::config::{BAUD_RATE, SAMPLE_RATE, SERIAL_PORT};
use adcscope_messages::{Baud, Hertz, SourceConfig};
use adcscope_ui::ControlSurface;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "adcscope")]
#[command(about = "Live ADC trace and spectrum from a serial-attached board", long_about = None)]
pub struct Args {
    /// Serial device the board is attached to
    #[arg(value_name = "PORT", default_value = SERIAL_PORT)]
    pub port: String,

    /// Serial line speed
    #[arg(long, default_value_t = BAUD_RATE)]
    pub baud: u32,

    /// Device sampling frequency, used for the spectrum axis
    #[arg(long, value_name = "HZ", default_value_t = SAMPLE_RATE)]
    pub sample_rate: u64,

    /// Play back a capture file (one sample per line) instead of the serial port
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Restart the replay file when it ends
    #[arg(long = "loop", requires = "replay")]
    pub looping: bool,

    /// Read commands from the console instead of showing buttons
    #[arg(long)]
    pub console: bool,
}

impl Args {
    pub fn source_config(&self) -> SourceConfig {
        match &self.replay {
            Some(path) => SourceConfig::Replay {
                path: path.clone(),
                looping: self.looping,
            },
            None => SourceConfig::Serial {
                path: self.port.clone(),
                baud: Baud(self.baud),
            },
        }
    }

    pub fn sample_rate(&self) -> Hertz {
        Hertz(self.sample_rate)
    }

    pub fn control_surface(&self) -> ControlSurface {
        if self.console {
            ControlSurface::Console
        } else {
            ControlSurface::Buttons
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board() {
        let args = Args::try_parse_from(["adcscope"]).unwrap();
        assert_eq!(args.source_config(), SourceConfig::default());
        assert_eq!(args.sample_rate(), Hertz(1_000));
        assert_eq!(args.control_surface(), ControlSurface::Buttons);
    }

    #[test]
    fn test_port_and_console() {
        let args =
            Args::try_parse_from(["adcscope", "/dev/ttyUSB1", "--baud", "9600", "--console"])
                .unwrap();
        assert_eq!(
            args.source_config(),
            SourceConfig::Serial {
                path: "/dev/ttyUSB1".to_string(),
                baud: Baud(9_600),
            }
        );
        assert_eq!(args.control_surface(), ControlSurface::Console);
    }

    #[test]
    fn test_replay_source() {
        let args = Args::try_parse_from(["adcscope", "--replay", "capture.txt", "--loop"]).unwrap();
        assert_eq!(
            args.source_config(),
            SourceConfig::Replay {
                path: PathBuf::from("capture.txt"),
                looping: true,
            }
        );
    }

    #[test]
    fn test_loop_requires_replay() {
        assert!(Args::try_parse_from(["adcscope", "--loop"]).is_err());
    }
}
