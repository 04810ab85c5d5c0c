use eframe::egui::{Color32, Response, Ui, Widget};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use adcscope_messages::config::{
    ADC_FULL_SCALE, MAX_POINTS, SAMPLE_RATE, SPECTRUM_DEFAULT_MAX, SPECTRUM_HEADROOM,
};
use adcscope_messages::{Frame, Hertz, LinkState, Spectrum};

/// Time trace and spectrum plots, stacked vertically.
pub struct Charts {
    samples: Vec<i32>,
    spectrum: Option<Spectrum>,
    window_len: usize,
    sample_rate: Hertz,
    /// Upper y limit of the spectrum plot. Only grows or shrinks when a
    /// spectrum with a non-zero peak arrives.
    spectrum_y_max: f64,
}

impl Charts {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            spectrum: None,
            window_len: MAX_POINTS,
            sample_rate: Hertz(SAMPLE_RATE),
            spectrum_y_max: SPECTRUM_DEFAULT_MAX,
        }
    }

    pub fn configure(&mut self, state: &LinkState) {
        self.window_len = state.window_len;
        self.sample_rate = state.sample_rate;
    }

    pub fn apply_frame(&mut self, frame: Frame) {
        self.samples = frame.samples;
        if let Some(spectrum) = frame.spectrum {
            let peak = spectrum.max_magnitude() as f64;
            if peak > 0.0 {
                self.spectrum_y_max = peak * SPECTRUM_HEADROOM;
            }
            self.spectrum = Some(spectrum);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn spectrum_y_max(&self) -> f64 {
        self.spectrum_y_max
    }

    fn trace_points(&self) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v as f64])
            .collect()
    }

    fn spectrum_points(&self) -> Option<Vec<[f64; 2]>> {
        let spectrum = self.spectrum.as_ref()?;
        Some(
            spectrum
                .frequencies
                .iter()
                .zip(&spectrum.magnitudes)
                .map(|(&f, &m)| [f as f64, m as f64])
                .collect(),
        )
    }
}

impl Widget for &mut Charts {
    fn ui(self, ui: &mut Ui) -> Response {
        let plot_height = (ui.available_height() / 2.0 - 30.0).max(100.0);
        let window_len = self.window_len as f64;
        let nyquist = self.sample_rate.nyquist();

        let trace = self.trace_points();
        ui.label("Real-Time ADC Data");
        Plot::new("adc_trace")
            .height(plot_height)
            .x_axis_label("Time (Samples)")
            .y_axis_label("ADC Value")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, 0.0],
                    [window_len, ADC_FULL_SCALE],
                ));
                plot_ui.line(Line::new("ADC", PlotPoints::from(trace)));
            });

        ui.add_space(10.0);

        ui.label("Frequency Spectrum (FFT)");
        let y_max = self.spectrum_y_max;
        let spectrum = self.spectrum_points();
        Plot::new("adc_spectrum")
            .height(plot_height)
            .x_axis_label("Frequency (Hz)")
            .y_axis_label("Magnitude")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [nyquist, y_max]));
                if let Some(points) = spectrum {
                    plot_ui.line(Line::new("FFT", PlotPoints::from(points)).color(Color32::RED));
                }
            });

        ui.response()
    }
}
