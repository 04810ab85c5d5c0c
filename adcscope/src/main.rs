mod cli;
mod console;

use adcscope_engine::{Engine, open_link};
use adcscope_messages::config::TICK_INTERVAL;
use adcscope_messages::{Command, SourceConfig};
use clap::Parser;
use cli::Args;

use log::{LevelFilter, error};
use std::io::Write;
use std::thread::JoinHandle;

/// Events buffered between engine and UI before frames are dropped.
const EVENT_QUEUE: usize = 16;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} - {} | {}",
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .filter_level(LevelFilter::Warn)
        .filter_module("adcscope", LevelFilter::Info)
        .filter_module("adcscope_engine", LevelFilter::Info)
        .filter_module("adcscope_ui", LevelFilter::Debug)
        .init();

    let args = Args::parse();
    let source_config = args.source_config();
    let sample_rate = args.sample_rate();

    // Failing to open the link is the only fatal error
    let link = open_link(&source_config, sample_rate, TICK_INTERVAL)
        .inspect_err(|e| error!("{e:#}"))?;
    match &source_config {
        SourceConfig::Serial { path, baud } => println!("Connected to {path} at {} baud.", baud.0),
        SourceConfig::Replay { path, .. } => println!("Replaying {}.", path.display()),
    }

    // Create flume channels for bidirectional communication
    let (cmd_tx, cmd_rx) = flume::unbounded();
    let (event_tx, event_rx) = flume::bounded(EVENT_QUEUE);

    // Spawn engine thread
    let engine_handle = std::thread::spawn(move || {
        let engine = Engine::new(link, cmd_rx, event_tx, source_config, sample_rate);
        engine.run()
    });

    if args.console {
        if let Err(e) = console::spawn(cmd_tx.clone()) {
            error!("Could not start console input: {e}");
            stop_engine(&cmd_tx, engine_handle)?;
            return Err(e.into());
        }
    }

    // Run UI on main thread (blocking). The engine is stopped and joined
    // even if the UI fails, so the device always gets the stop byte.
    let ui_result = adcscope_ui::run(event_rx, cmd_tx.clone(), args.control_surface());
    if let Err(e) = &ui_result {
        error!("UI failed: {e:#}");
    }

    println!("Window closed. Sending stop command.");
    stop_engine(&cmd_tx, engine_handle)?;

    ui_result
}

/// Ask the engine to send the stop byte and close the link, then wait for it.
fn stop_engine(
    cmd_tx: &flume::Sender<Command>,
    engine_handle: JoinHandle<anyhow::Result<()>>,
) -> anyhow::Result<()> {
    let _ = cmd_tx.send(Command::Stop);

    engine_handle
        .join()
        .map_err(|_| anyhow::anyhow!("Engine thread panicked"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcscope_engine::SampleLink;
    use adcscope_messages::{Event, Hertz};
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

    #[test]
    fn test_stop_engine_sends_stop_byte_when_ui_never_ran() {
        let link = RecordingLink::default();
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let (event_tx, event_rx) = flume::bounded::<Event>(EVENT_QUEUE);

        let engine_link = link.clone();
        let engine_handle = std::thread::spawn(move || {
            let engine = Engine::new(
                Box::new(engine_link),
                cmd_rx,
                event_tx,
                SourceConfig::default(),
                Hertz(1_000),
            );
            engine.run()
        });

        // The UI failed to start and its receiver is still held here unread
        stop_engine(&cmd_tx, engine_handle).unwrap();
        drop(event_rx);

        assert_eq!(*link.written.lock().unwrap(), b"p");
    }
}
