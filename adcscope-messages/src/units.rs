/// Frequency in Hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hertz(pub u64);

impl std::fmt::Display for Hertz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

impl Hertz {
    pub const fn as_hz(self) -> u64 {
        self.0
    }

    /// Highest representable frequency when sampling at this rate.
    pub fn nyquist(self) -> f64 {
        self.0 as f64 / 2.0
    }
}

/// Serial line speed in symbols per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Baud(pub u32);

impl std::fmt::Display for Baud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} baud", self.0)
    }
}

impl Baud {
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}
