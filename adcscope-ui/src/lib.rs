mod charts;
mod control_panel;
mod state;

use adcscope_messages::config::TICK_INTERVAL;
use adcscope_messages::{Command, Event};
use log::info;
use state::UiState;

/// Where device commands come from while the window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSurface {
    /// On-screen buttons below the plots.
    Buttons,
    /// Commands are typed on the console. The window only shows plots.
    Console,
}

/// Main application struct implementing the egui App trait.
pub struct AdcScopeApp {
    /// Receiver for events from engine
    event_rx: flume::Receiver<Event>,

    /// Local application state
    state: UiState,

    /// Close already requested from the viewport
    closing: bool,
}

impl AdcScopeApp {
    fn new(
        event_rx: flume::Receiver<Event>,
        cmd_tx: flume::Sender<Command>,
        surface: ControlSurface,
    ) -> Self {
        Self {
            event_rx,
            state: UiState::new(cmd_tx, surface == ControlSurface::Buttons),
            closing: false,
        }
    }
}

impl eframe::App for AdcScopeApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        // Pull every pending event from the engine
        self.state.drain_events(&self.event_rx);

        if self.state.engine_stopped && !self.closing {
            self.closing = true;
            info!("Engine closed the link, closing window");
            ctx.send_viewport_cmd(eframe::egui::ViewportCommand::Close);
        }

        ctx.request_repaint_after(TICK_INTERVAL);

        eframe::egui::TopBottomPanel::bottom("control_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(control_panel) = self.state.control_panel.as_mut() {
                ui.add(control_panel);
            }
            ui.label(self.state.status_line());
            ui.add_space(4.0);
        });

        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.link_state.is_some() {
                ui.add(&mut self.state.charts);
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Waiting for serial link...");
                });
            }
        });
    }
}

/// Entry point for the UI module.
///
/// Runs the eframe application on the main thread (blocking) until the
/// window is closed.
pub fn run(
    event_rx: flume::Receiver<Event>,
    cmd_tx: flume::Sender<Command>,
    surface: ControlSurface,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_title("ADC Scope"),
        ..Default::default()
    };

    eframe::run_native(
        "ADC Scope",
        options,
        Box::new(move |_cc| Ok(Box::new(AdcScopeApp::new(event_rx, cmd_tx, surface)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
