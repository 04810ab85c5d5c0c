use anyhow::{Context, Result};
use log::{debug, info};
use serialport::SerialPort;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use adcscope_messages::config::READ_TIMEOUT;
use adcscope_messages::{Baud, Hertz, SourceConfig};

/// Byte-oriented connection to the sampling device.
pub trait SampleLink: Send {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Read bytes into the provided buffer.
    /// Returns the number of bytes read, or an error.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write a single command byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

/// Open the link described by `config`.
pub fn open_link(
    config: &SourceConfig,
    sample_rate: Hertz,
    tick: Duration,
) -> Result<Box<dyn SampleLink>> {
    match config {
        SourceConfig::Serial { path, baud } => Ok(Box::new(SerialLink::open(path, *baud)?)),
        SourceConfig::Replay { path, looping } => {
            let lines = ReplayLink::lines_per_tick(sample_rate, tick);
            let link = ReplayLink::open(path, *looping, lines)
                .with_context(|| format!("Could not open replay file {}", path.display()))?;
            Ok(Box::new(link))
        }
    }
}

/// Serial port backed link.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    pub fn open(path: &str, baud: Baud) -> Result<Self> {
        let port = serialport::new(path, baud.as_u32())
            .timeout(READ_TIMEOUT)
            .open()
            .with_context(|| {
                format!("Could not open serial port {path}. Check connection or permissions.")
            })?;
        info!("Opened {path} at {baud}");
        Ok(Self { port })
    }
}

impl SampleLink for SerialLink {
    fn bytes_available(&mut self) -> io::Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.port.write_all(&[byte])?;
        self.port.flush()
    }
}

/// Plays back a text capture (one sample per line) as if it were arriving
/// from the device. Each poll releases at most `lines_per_poll` lines.
#[derive(Debug)]
pub struct ReplayLink {
    data: Vec<u8>,
    cursor: usize,
    released_to: usize,
    looping: bool,
    lines_per_poll: usize,
}

impl ReplayLink {
    /// Create a ReplayLink from a capture file.
    /// If looping is true, playback restarts from the beginning on EOF.
    pub fn open<P: AsRef<Path>>(path: P, looping: bool, lines_per_poll: usize) -> io::Result<Self> {
        let data = fs::read(path)?;
        Ok(Self::from_bytes(data, looping, lines_per_poll))
    }

    pub fn from_bytes(mut data: Vec<u8>, looping: bool, lines_per_poll: usize) -> Self {
        // A looping capture must not run its last line into its first
        if looping && data.last().is_some_and(|&b| b != b'\n') {
            data.push(b'\n');
        }
        Self {
            data,
            cursor: 0,
            released_to: 0,
            looping,
            lines_per_poll: lines_per_poll.max(1),
        }
    }

    /// Lines produced by the device during one tick, rounded up.
    pub fn lines_per_tick(sample_rate: Hertz, tick: Duration) -> usize {
        let lines = (sample_rate.as_hz() as f64 * tick.as_secs_f64()).ceil() as usize;
        lines.max(1)
    }

    /// End offset after the next `lines_per_poll` newlines, or EOF.
    fn release_end(&self) -> usize {
        self.data[self.cursor..]
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(self.lines_per_poll - 1)
            .map(|(offset, _)| self.cursor + offset + 1)
            .unwrap_or(self.data.len())
    }
}

impl SampleLink for ReplayLink {
    fn bytes_available(&mut self) -> io::Result<usize> {
        if self.cursor >= self.data.len() && self.looping && !self.data.is_empty() {
            debug!("Replay reached EOF, rewinding");
            self.cursor = 0;
        }
        self.released_to = self.release_end();
        Ok(self.released_to - self.cursor)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.released_to.saturating_sub(self.cursor));
        buf[..n].copy_from_slice(&self.data[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        debug!("Replay link ignoring command byte {:?}", byte as char);
        Ok(())
    }
}
