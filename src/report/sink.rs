// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output sinks and color palettes.

use colored::{ColoredString, Colorize};
use std::io::{self, Write};

use super::{Tag, Tone};

/// ANSI: erase display, cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How tags are turned into text. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Ansi,
    Plain,
}

impl Palette {
    #[must_use]
    pub const fn new(colors: bool) -> Self {
        if colors { Self::Ansi } else { Self::Plain }
    }

    #[must_use]
    pub fn paint(self, tag: &Tag) -> String {
        match self {
            Self::Plain => tag.text.clone(),
            Self::Ansi => tone_color(&tag.text, tag.tone).to_string(),
        }
    }

    /// Tags joined with `", "`.
    #[must_use]
    pub fn join(self, tags: &[Tag]) -> String {
        tags.iter()
            .map(|tag| self.paint(tag))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn tone_color(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Ok => text.green(),
        Tone::Info => text.blue(),
        Tone::Warning => text.yellow(),
        Tone::Failure => text.red(),
    }
}

/// Destination of report output.
pub trait OutputSink {
    /// Write `prefix` followed by the tags joined with `", "`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_line(&mut self, prefix: &str, tags: &[Tag]) -> io::Result<()>;

    /// Write an untagged line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Clear the screen; a no-op for non-terminal sinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn clear_screen(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes to a terminal or any other writer, flushing every line.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
    palette: Palette,
}

impl ConsoleSink<io::Stdout> {
    #[must_use]
    pub fn stdout(palette: Palette) -> Self {
        Self::new(io::stdout(), palette)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub const fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn write_line(&mut self, prefix: &str, tags: &[Tag]) -> io::Result<()> {
        writeln!(self.out, "{prefix}{}", self.palette.join(tags))?;
        self.out.flush()
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.out, "{CLEAR_SCREEN}")?;
        self.out.flush()
    }
}

/// Keeps plain lines in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, prefix: &str, tags: &[Tag]) -> io::Result<()> {
        self.lines
            .push(format!("{prefix}{}", Palette::Plain.join(tags)));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }
}
