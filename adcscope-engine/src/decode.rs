use log::{debug, trace};

/// Longest partial line kept between polls. Samples are at most a handful of
/// digits, so anything longer is line noise.
const MAX_PENDING: usize = 1024;

/// Splits the inbound byte stream into newline-delimited samples.
///
/// Bytes after the last newline are held until the next `feed`, so a line
/// split across two reads is decoded once it completes.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` and return every sample from the lines completed by them.
    /// Lines that are not UTF-8, blank, or not an integer are dropped.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<i32> {
        self.pending.extend_from_slice(bytes);

        let mut samples = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|&b| b == b'\n') {
            if let Some(sample) = decode_line(&self.pending[start..start + offset]) {
                samples.push(sample);
            }
            start += offset + 1;
        }
        self.pending.drain(..start);

        if self.pending.len() > MAX_PENDING {
            debug!("Discarding {} bytes without a line break", self.pending.len());
            self.pending.clear();
        }

        samples
    }

    /// Bytes waiting for a line terminator.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn decode_line(line: &[u8]) -> Option<i32> {
    match std::str::from_utf8(line) {
        Ok(text) => parse_sample(text),
        Err(e) => {
            trace!("Dropping undecodable line: {e}");
            None
        }
    }
}

/// Parse one line of device output. Surrounding whitespace (including the
/// firmware's `\r`) is ignored.
pub fn parse_sample(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Dropping malformed line {text:?}: {e}");
            None
        }
    }
}
