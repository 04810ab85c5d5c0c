use eframe::egui::{Button, Color32, Response, RichText, Ui, Widget};
use flume::Sender;
use log::debug;

use adcscope_messages::{Command, DeviceCommand};

const BUTTON_SIZE: [f32; 2] = [96.0, 32.0];

/// Row of buttons, one per device command.
pub struct ControlPanel {
    cmd_tx: Sender<Command>,
}

impl ControlPanel {
    pub fn new(cmd_tx: Sender<Command>) -> Self {
        Self { cmd_tx }
    }

    fn click(&self, cmd: DeviceCommand) {
        debug!("{} clicked", cmd.label());
        let _ = self.cmd_tx.send(Command::Send(cmd));
    }
}

fn button_fill(cmd: DeviceCommand) -> Color32 {
    match cmd {
        DeviceCommand::Start => Color32::from_rgb(0xd9, 0xea, 0xd3),
        DeviceCommand::Pause => Color32::from_rgb(0xf4, 0xcc, 0xcc),
        _ => Color32::from_rgb(0xcf, 0xe2, 0xf3),
    }
}

impl Widget for &mut ControlPanel {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            for cmd in DeviceCommand::ALL {
                let text = RichText::new(cmd.label()).color(Color32::BLACK);
                let button = Button::new(text).fill(button_fill(cmd));
                if ui.add_sized(BUTTON_SIZE, button).clicked() {
                    self.click(cmd);
                }
            }
        });

        ui.response()
    }
}
