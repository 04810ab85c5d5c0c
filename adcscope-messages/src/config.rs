//! Default acquisition constants.

use std::time::Duration;

/// Serial device the STM32 board enumerates as.
pub const SERIAL_PORT: &str = "/dev/ttyACM0";

/// UART baud rate configured in the firmware.
pub const BAUD_RATE: u32 = 115_200;

/// Rolling window length. Also the FFT size.
pub const MAX_POINTS: usize = 512;

/// Estimated device sampling frequency in Hz (TIM2 update rate).
pub const SAMPLE_RATE: u64 = 1_000;

/// Upper bound for blocking serial reads.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Engine poll and UI redraw interval.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Upper y limit of the time trace. The ADC is 12 bit (0..=4095).
pub const ADC_FULL_SCALE: f64 = 4200.0;

/// Spectrum y limit used until the first spectrum arrives.
pub const SPECTRUM_DEFAULT_MAX: f64 = 1000.0;

/// Headroom applied above the spectrum peak.
pub const SPECTRUM_HEADROOM: f64 = 1.2;
