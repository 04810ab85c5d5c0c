//! Message types shared between the acquisition engine, the UI and the
//! console front end.

pub mod config;
mod command;
mod event;
mod state;
mod units;

pub use command::{Command, ConsoleInput, DeviceCommand};
pub use event::{Event, Frame, Spectrum};
pub use state::{LinkState, SourceConfig};
pub use units::{Baud, Hertz};
