/// Mode commands understood by the firmware. Each one is a single byte on
/// the wire with no payload and no acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCommand {
    /// Start streaming with the filter bypassed.
    Start,
    /// Stop streaming.
    Pause,
    /// Butterworth low-pass.
    LowPass,
    /// Butterworth high-pass.
    HighPass,
    /// Butterworth band-pass.
    BandPass,
    /// Butterworth band-stop.
    BandStop,
}

impl DeviceCommand {
    /// Button order of the control panel.
    pub const ALL: [DeviceCommand; 6] = [
        Self::Start,
        Self::LowPass,
        Self::HighPass,
        Self::BandPass,
        Self::BandStop,
        Self::Pause,
    ];

    pub const fn byte(self) -> u8 {
        match self {
            Self::Start => b's',
            Self::Pause => b'p',
            Self::LowPass => b'a',
            Self::HighPass => b'b',
            Self::BandPass => b'c',
            Self::BandStop => b'd',
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.byte() == byte)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Pause => "Pause",
            Self::LowPass => "LPF",
            Self::HighPass => "HPF",
            Self::BandPass => "BPF",
            Self::BandStop => "BSF",
        }
    }
}

impl std::fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.byte() as char)
    }
}

/// Commands sent from the UI or console to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Write one command byte to the device.
    Send(DeviceCommand),
    /// Send the stop byte, close the link and terminate the engine.
    Stop,
}

/// One parsed line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Send(DeviceCommand),
    Quit,
}

impl ConsoleInput {
    /// Parse a typed line. Accepts the raw command characters as well as
    /// the button labels, ignoring case and surrounding whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        match word.as_str() {
            "q" | "quit" | "exit" => return Some(Self::Quit),
            "" => return None,
            _ => {}
        }

        if let [byte] = word.as_bytes() {
            return DeviceCommand::from_byte(*byte).map(Self::Send);
        }

        DeviceCommand::ALL
            .into_iter()
            .find(|cmd| cmd.label().eq_ignore_ascii_case(&word))
            .map(Self::Send)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_command_has_one_fixed_byte() {
        let bytes: Vec<u8> = DeviceCommand::ALL.iter().map(|c| c.byte()).collect();
        assert_eq!(bytes, b"sabcdp");

        for cmd in DeviceCommand::ALL {
            assert_eq!(DeviceCommand::from_byte(cmd.byte()), Some(cmd));
        }
    }

    #[test]
    fn test_from_byte_rejects_unknown() {
        assert_eq!(DeviceCommand::from_byte(b'q'), None);
        assert_eq!(DeviceCommand::from_byte(b'S'), None);
    }

    #[test]
    fn test_console_parses_characters_and_labels() {
        assert_eq!(
            ConsoleInput::parse("s\n"),
            Some(ConsoleInput::Send(DeviceCommand::Start))
        );
        assert_eq!(
            ConsoleInput::parse("  BPF "),
            Some(ConsoleInput::Send(DeviceCommand::BandPass))
        );
        assert_eq!(
            ConsoleInput::parse("pause"),
            Some(ConsoleInput::Send(DeviceCommand::Pause))
        );
        assert_eq!(ConsoleInput::parse("Q"), Some(ConsoleInput::Quit));
        assert_eq!(ConsoleInput::parse("exit"), Some(ConsoleInput::Quit));
    }

    #[test]
    fn test_console_rejects_unknown_input() {
        assert_eq!(ConsoleInput::parse(""), None);
        assert_eq!(ConsoleInput::parse("x"), None);
        assert_eq!(ConsoleInput::parse("sp"), None);
        assert_eq!(ConsoleInput::parse("notch"), None);
    }
}
