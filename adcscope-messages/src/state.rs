use crate::config::{BAUD_RATE, SERIAL_PORT};
use crate::{Baud, Hertz};
use std::path::PathBuf;

/// Description of the running link, as reported by the engine.
#[derive(Debug, Clone)]
pub struct LinkState {
    /// Human readable source name (device path or replay file).
    pub source: String,
    /// Source configuration the engine was started with
    pub source_config: SourceConfig,
    /// Device sampling frequency used for the spectrum axis
    pub sample_rate: Hertz,
    /// Rolling window length
    pub window_len: usize,
}

/// Where samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    /// A serial device streaming one decimal sample per line.
    Serial { path: String, baud: Baud },
    /// A text capture with one sample per line, paced at the sample rate.
    Replay { path: PathBuf, looping: bool },
}

impl SourceConfig {
    pub fn describe(&self) -> String {
        match self {
            SourceConfig::Serial { path, baud } => format!("{path} @ {baud}"),
            SourceConfig::Replay { path, looping } => {
                let suffix = if *looping { " (loop)" } else { "" };
                format!("replay {}{suffix}", path.display())
            }
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Serial {
            path: SERIAL_PORT.to_string(),
            baud: Baud(BAUD_RATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_board_serial() {
        assert_eq!(
            SourceConfig::default().describe(),
            "/dev/ttyACM0 @ 115200 baud"
        );
    }

    #[test]
    fn test_describe_replay() {
        let config = SourceConfig::Replay {
            path: PathBuf::from("capture.txt"),
            looping: true,
        };
        assert_eq!(config.describe(), "replay capture.txt (loop)");
    }
}
