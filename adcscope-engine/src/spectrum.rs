use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use adcscope_messages::{Hertz, Spectrum};

/// One-sided magnitude spectrum of a fixed-length integer window.
///
/// The window mean is removed before the transform so the DC level of the
/// ADC does not swamp bin 0. Only the non-negative frequency bins are kept
/// (`0..n/2` for even `n`) and magnitudes are scaled by `2/n` so a pure tone
/// of amplitude `A` reads as roughly `A`.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    sample_rate: Hertz,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize, sample_rate: Hertz) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
            sample_rate,
        }
    }

    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn analyze(&mut self, samples: &[i32]) -> Spectrum {
        let n = samples.len();
        if n == 0 {
            return Spectrum::default();
        }
        if n != self.size() {
            *self = Self::new(n, self.sample_rate);
        }

        let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n as f64;
        for (slot, &sample) in self.buffer.iter_mut().zip(samples) {
            *slot = Complex::new((sample as f64 - mean) as f32, 0.0);
        }

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let bins = n.div_ceil(2);
        let bin_width = self.sample_rate.as_hz() as f32 / n as f32;
        let scale = 2.0 / n as f32;

        Spectrum {
            frequencies: (0..bins).map(|k| k as f32 * bin_width).collect(),
            magnitudes: self.buffer[..bins].iter().map(|c| c.norm() * scale).collect(),
        }
    }
}

/// Plan, run and discard a transform for a single window.
pub fn compute_spectrum(samples: &[i32], sample_rate: Hertz) -> Spectrum {
    SpectrumAnalyzer::new(samples.len(), sample_rate).analyze(samples)
}
