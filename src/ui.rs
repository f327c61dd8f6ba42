// Presentation layer: the request helper and the workflow narrate what they
// are doing through a `Narrator`. The console implementation colours each
// line with crossterm; tests plug in a recorder or the silent sink.

use crossterm::style::Stylize;

/// How a narrated line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Steps and outgoing requests (blue).
    Info,
    /// Request payloads and secondary notes (bold yellow).
    Detail,
    /// Successful responses and results (green).
    Success,
    /// Failures (red).
    Failure,
    Plain,
}

/// Sink for human-readable progress output.
pub trait Narrator: Send + Sync {
    fn say(&self, tone: Tone, message: &str);

    fn blank(&self) {
        self.say(Tone::Plain, "");
    }
}

/// Writes every line to stdout, coloured by tone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn say(&self, tone: Tone, message: &str) {
        match tone {
            Tone::Info => println!("{}", message.blue()),
            Tone::Detail => println!("{}", message.yellow().bold()),
            Tone::Success => println!("{}", message.green()),
            Tone::Failure => println!("{}", message.red()),
            Tone::Plain => println!("{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn say(&self, _tone: Tone, _message: &str) {}
}
