//! Line-oriented command prompt on standard input.

use flume::Sender;
use log::debug;
use std::io::{self, BufRead, Write};
use std::thread;

use adcscope_messages::{Command, ConsoleInput, DeviceCommand};

/// Start the console reader on a detached thread. It ends on quit, on EOF
/// or once the engine stops accepting commands.
pub fn spawn(cmd_tx: Sender<Command>) -> io::Result<()> {
    thread::Builder::new()
        .name("console".to_string())
        .spawn(move || run(io::stdin().lock(), io::stdout(), &cmd_tx))?;
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    for cmd in DeviceCommand::ALL {
        writeln!(out, "  {cmd}  {}", cmd.label())?;
    }
    writeln!(out, "  q  Quit")
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn run<R: BufRead, W: Write>(input: R, mut out: W, cmd_tx: &Sender<Command>) {
    if let Err(e) = session(input, &mut out, cmd_tx) {
        debug!("Console output failed: {e}");
    }
    debug!("Console input closed");
}

fn session<R: BufRead, W: Write>(input: R, out: &mut W, cmd_tx: &Sender<Command>) -> io::Result<()> {
    print_help(out)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        match ConsoleInput::parse(&line) {
            Some(ConsoleInput::Send(cmd)) => {
                // The engine confirms the write once it reaches the device
                if cmd_tx.send(Command::Send(cmd)).is_err() {
                    writeln!(out, "Link closed, {} not sent", cmd.label())?;
                    return Ok(());
                }
            }
            Some(ConsoleInput::Quit) => {
                let _ = cmd_tx.send(Command::Stop);
                return Ok(());
            }
            None if line.trim().is_empty() => {}
            None => {
                writeln!(out, "Unknown command {:?}", line.trim())?;
                print_help(out)?;
            }
        }
        prompt(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str) -> (Vec<Command>, String) {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let mut out = Vec::new();
        run(Cursor::new(input.to_string()), &mut out, &cmd_tx);
        (cmd_rx.try_iter().collect(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_commands_forwarded_in_order() {
        let (sent, out) = run_session("s\nlpf\n\nd\n");
        assert_eq!(
            sent,
            vec![
                Command::Send(DeviceCommand::Start),
                Command::Send(DeviceCommand::LowPass),
                Command::Send(DeviceCommand::BandStop),
            ]
        );
        // Only the engine reports a command as sent
        assert!(!out.contains("Sent"));
    }

    #[test]
    fn test_quit_stops_engine_and_ends_session() {
        let (sent, _out) = run_session("b\nq\nc\n");
        assert_eq!(
            sent,
            vec![Command::Send(DeviceCommand::HighPass), Command::Stop]
        );
    }

    #[test]
    fn test_unknown_input_prints_vocabulary() {
        let (sent, out) = run_session("x\n");
        assert!(sent.is_empty());
        assert!(out.contains("Unknown command \"x\""));
        assert!(out.contains("  p  Pause"));
    }

    #[test]
    fn test_session_ends_when_engine_gone() {
        let (cmd_tx, cmd_rx) = flume::unbounded();
        drop(cmd_rx);
        let mut out = Vec::new();
        run(Cursor::new("s\ns\n"), &mut out, &cmd_tx);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Link closed, Start not sent").count(), 1);
    }
}
