mod decode;
mod link;
mod spectrum;
mod window;

pub use decode::{LineDecoder, parse_sample};
pub use link::{ReplayLink, SampleLink, SerialLink, open_link};
pub use spectrum::{SpectrumAnalyzer, compute_spectrum};
pub use window::SampleWindow;

use anyhow::Result;
use flume::{Receiver, RecvTimeoutError, Sender, TrySendError};
use log::{debug, info, warn};
use std::io::ErrorKind;
use std::time::{Duration, Instant};

use adcscope_messages::config::{MAX_POINTS, TICK_INTERVAL};
use adcscope_messages::{Command, DeviceCommand, Event, Frame, Hertz, LinkState, SourceConfig};

/// How long shutdown waits for the UI to accept the final event.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// The acquisition backend.
/// Owns the sample link, polls it every tick and executes commands from the
/// UI or console.
pub struct Engine {
    link: Option<Box<dyn SampleLink>>,
    cmd_rx: Receiver<Command>,
    event_tx: Sender<Event>,
    source_config: SourceConfig,
    sample_rate: Hertz,
    tick_interval: Duration,
    decoder: LineDecoder,
    window: SampleWindow,
    analyzer: SpectrumAnalyzer,
    read_buf: Vec<u8>,
}

impl Engine {
    /// Create a new Engine instance around an already opened link.
    pub fn new(
        link: Box<dyn SampleLink>,
        cmd_rx: Receiver<Command>,
        event_tx: Sender<Event>,
        source_config: SourceConfig,
        sample_rate: Hertz,
    ) -> Self {
        debug!("Constructing a new engine for {}", source_config.describe());
        Self {
            link: Some(link),
            cmd_rx,
            event_tx,
            source_config,
            sample_rate,
            tick_interval: TICK_INTERVAL,
            decoder: LineDecoder::new(),
            window: SampleWindow::new(MAX_POINTS),
            analyzer: SpectrumAnalyzer::new(MAX_POINTS, sample_rate),
            read_buf: Vec::new(),
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Run the engine (blocking).
    /// Returns once a Stop command arrives or either channel disconnects.
    /// The stop byte is sent to the device on every exit path.
    pub fn run(mut self) -> Result<()> {
        let result = self.process_commands();
        self.shutdown();
        result
    }

    fn link_state(&self) -> LinkState {
        LinkState {
            source: self.source_config.describe(),
            source_config: self.source_config.clone(),
            sample_rate: self.sample_rate,
            window_len: self.window.capacity(),
        }
    }

    fn process_commands(&mut self) -> Result<()> {
        self.event_tx.send(Event::StateSnapshot(self.link_state()))?;

        let mut next_tick = Instant::now();
        loop {
            match self.cmd_rx.recv_deadline(next_tick) {
                Ok(Command::Send(cmd)) => self.send_command(cmd),
                Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("Engine stopping");
                    return Ok(());
                }
                Err(RecvTimeoutError::Timeout) => {
                    let now = Instant::now();
                    next_tick += self.tick_interval;
                    if next_tick < now {
                        next_tick = now + self.tick_interval;
                    }
                    if !self.tick() {
                        debug!("Event receiver gone, engine stopping");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Drain the link and publish a frame if any samples arrived.
    /// Returns false once the UI has disconnected.
    fn tick(&mut self) -> bool {
        if self.poll_link() == 0 {
            return true;
        }

        let samples = self.window.snapshot();
        let spectrum = if self.window.is_full() {
            Some(self.analyzer.analyze(&samples))
        } else {
            None
        };

        match self.event_tx.try_send(Event::Frame(Frame { samples, spectrum })) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Event channel full, dropping frame");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Read everything currently buffered on the link into the window.
    /// Returns the number of samples added.
    fn poll_link(&mut self) -> usize {
        let Some(link) = self.link.as_mut() else {
            return 0;
        };

        let available = match link.bytes_available() {
            Ok(n) => n,
            Err(e) => {
                debug!("Link poll failed: {e}");
                return 0;
            }
        };
        if available == 0 {
            return 0;
        }

        self.read_buf.resize(available, 0);
        let mut filled = 0;
        while filled < available {
            match link.read(&mut self.read_buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Link read failed: {e}");
                    break;
                }
            }
        }

        let samples = self.decoder.feed(&self.read_buf[..filled]);
        let added = samples.len();
        self.window.extend(samples);
        added
    }

    fn send_command(&mut self, cmd: DeviceCommand) {
        let Some(link) = self.link.as_mut() else {
            debug!("Link closed, not sending {cmd}");
            return;
        };

        match link.write_byte(cmd.byte()) {
            Ok(()) => {
                println!(">> Sent: {cmd} ({})", cmd.label());
                if let Err(e) = self.event_tx.try_send(Event::CommandSent(cmd)) {
                    debug!("Could not report sent command: {e}");
                }
            }
            Err(e) => debug!("Write of {cmd} failed: {e}"),
        }
    }

    /// Send the stop byte and close the link. Later calls do nothing.
    fn shutdown(&mut self) {
        let Some(mut link) = self.link.take() else {
            return;
        };

        match link.write_byte(DeviceCommand::Pause.byte()) {
            Ok(()) => info!("Link closing, sent stop command"),
            Err(e) => warn!("Could not send stop command: {e}"),
        }
        drop(link);

        let _ = self.event_tx.send_timeout(Event::Shutdown, SHUTDOWN_GRACE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingLink {
        written: Arc<Mutex<Vec<u8>>>,
    }

    impl SampleLink for RecordingLink {
        fn bytes_available(&mut self) -> io::Result<usize> {
            Ok(0)
        }

        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn write_byte(&mut self, byte: u8) -> io::Result<()> {
            self.written.lock().unwrap().push(byte);
            Ok(())
        }
    }

    fn engine_with(link: RecordingLink) -> (Engine, Sender<Command>, Receiver<Event>) {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let (event_tx, event_rx) = flume::unbounded();
        let engine = Engine::new(
            Box::new(link),
            cmd_rx,
            event_tx,
            SourceConfig::default(),
            Hertz(1_000),
        );
        (engine, cmd_tx, event_rx)
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let link = RecordingLink::default();
        let (mut engine, _cmd_tx, event_rx) = engine_with(link.clone());

        engine.shutdown();
        engine.shutdown();

        assert_eq!(*link.written.lock().unwrap(), b"p");
        assert!(matches!(event_rx.try_recv(), Ok(Event::Shutdown)));
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn test_commands_ignored_after_shutdown() {
        let link = RecordingLink::default();
        let (mut engine, _cmd_tx, _event_rx) = engine_with(link.clone());

        engine.shutdown();
        engine.send_command(DeviceCommand::Start);

        assert_eq!(*link.written.lock().unwrap(), b"p");
    }

    #[test]
    fn test_link_state_describes_source() {
        let (engine, _cmd_tx, _event_rx) = engine_with(RecordingLink::default());
        let state = engine.link_state();

        assert_eq!(state.window_len, MAX_POINTS);
        assert_eq!(state.sample_rate, Hertz(1_000));
        assert_eq!(state.source, "/dev/ttyACM0 @ 115200 baud");
    }
}
