use flume::{Receiver, Sender, TryRecvError};

use crate::charts::Charts;
use crate::control_panel::ControlPanel;
use adcscope_messages::{Command, DeviceCommand, Event, LinkState};

/// Local UI state derived from engine events.
pub(super) struct UiState {
    /// Link description (from StateSnapshot)
    pub link_state: Option<LinkState>,

    /// Plot widget state
    pub charts: Charts,

    /// Button row. Absent when commands come from the console.
    pub control_panel: Option<ControlPanel>,

    /// Most recent command the engine wrote to the device
    pub last_sent: Option<DeviceCommand>,

    /// Set once the engine has closed the link
    pub engine_stopped: bool,
}

impl UiState {
    pub fn new(cmd_tx: Sender<Command>, with_buttons: bool) -> Self {
        Self {
            link_state: None,
            charts: Charts::new(),
            control_panel: with_buttons.then(|| ControlPanel::new(cmd_tx)),
            last_sent: None,
            engine_stopped: false,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::StateSnapshot(state) => {
                self.charts.configure(&state);
                self.link_state = Some(state);
            }
            Event::Frame(frame) => self.charts.apply_frame(frame),
            Event::CommandSent(cmd) => self.last_sent = Some(cmd),
            Event::Shutdown => self.engine_stopped = true,
        }
    }

    /// Apply every pending event. The engine drops its sender on exit, so a
    /// disconnected channel means the link is closed even if the final
    /// Shutdown event was never delivered.
    pub fn drain_events(&mut self, event_rx: &Receiver<Event>) {
        loop {
            match event_rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.engine_stopped = true;
                    break;
                }
            }
        }
    }

    pub fn status_line(&self) -> String {
        let source = self
            .link_state
            .as_ref()
            .map(|state| state.source.as_str())
            .unwrap_or("no link");
        let last = self
            .last_sent
            .map(|cmd| format!("{} ({cmd})", cmd.label()))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{source} | window {}/{} | last command: {last}",
            self.charts.sample_count(),
            self.charts.window_len()
        )
    }
}
