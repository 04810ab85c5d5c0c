use crate::{DeviceCommand, LinkState};

/// Events sent from the engine to the UI.
#[derive(Debug)]
pub enum Event {
    /// Link description, sent once before the first frame.
    StateSnapshot(LinkState),
    /// Latest window contents, published every tick.
    Frame(Frame),
    /// A command byte was handed to the link.
    CommandSent(DeviceCommand),
    /// The engine closed the link. The UI should close as well.
    Shutdown,
}

/// One tick's worth of display data.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Window contents, oldest first.
    pub samples: Vec<i32>,
    /// Present only once the window is full.
    pub spectrum: Option<Spectrum>,
}

/// One-sided magnitude spectrum of a sample window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Bin centre frequencies in Hz, ascending from 0.
    pub frequencies: Vec<f32>,
    /// Amplitude-scaled magnitudes, one per frequency.
    pub magnitudes: Vec<f32>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn max_magnitude(&self) -> f32 {
        self.magnitudes.iter().copied().fold(0.0, f32::max)
    }

    /// Frequency and magnitude of the strongest bin.
    pub fn peak(&self) -> Option<(f32, f32)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_and_max() {
        let spectrum = Spectrum {
            frequencies: vec![0.0, 10.0, 20.0],
            magnitudes: vec![0.5, 3.0, 1.0],
        };
        assert_eq!(spectrum.peak(), Some((10.0, 3.0)));
        assert_eq!(spectrum.max_magnitude(), 3.0);
        assert_eq!(Spectrum::default().peak(), None);
    }
}
