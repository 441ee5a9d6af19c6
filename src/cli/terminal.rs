//! Summary lines written to stderr once a command finishes.

use std::fmt::Arguments;

use owo_colors::{colors::css, OwoColorize};

/// How a summary line should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// The command produced its output.
    Done,
    /// Incidental detail, such as blobs that carried no identifier.
    Note,
    /// Something in the source needs a second look, such as a repeated identifier.
    Alert,
}

/// Prints `message` to stderr, coloured by `tone` when stderr supports it.
pub fn summary(tone: Tone, message: Arguments<'_>) {
    let enabled = supports_color::on(supports_color::Stream::Stderr).is_some();
    eprintln!("{}", paint(&message.to_string(), tone, enabled));
}

fn paint(text: &str, tone: Tone, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match tone {
        Tone::Done => text.fg::<css::Green>().to_string(),
        Tone::Note => text.dimmed().to_string(),
        Tone::Alert => text.fg::<css::Orange>().to_string(),
    }
}
