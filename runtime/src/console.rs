//! Line-oriented console I/O.
//!
//! The shell never calls `stdin`/`stdout` directly; it talks to a [`Console`],
//! so whole sessions can be scripted in tests. The `prompt_*` helpers
//! implement the retry-until-valid loops: a rejected line prints a message and
//! the same prompt is shown again.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while prompting
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Reading or writing the terminal failed
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input reached end-of-file while a value was still required
    #[error("input closed")]
    InputClosed,
}

/// A line-oriented terminal
pub trait Console {
    /// Show `prompt` (no newline) and read one line without its line ending
    ///
    /// Returns `Ok(None)` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write `line` followed by a newline
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Console backed by the process stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole {
    buffer: String,
}

impl StdConsole {
    /// Creates a console on the process stdin/stdout
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        self.buffer.clear();
        if io::stdin().lock().read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }

        let line = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(Some(line.to_string()))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{line}")
    }
}

/// Reads one line, treating end of input as an error
///
/// # Errors
///
/// [`ConsoleError::InputClosed`] at end of input, or the I/O error.
pub fn read_required<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
) -> Result<String, ConsoleError> {
    console.read_line(prompt)?.ok_or(ConsoleError::InputClosed)
}

/// Prompts until `parse` accepts the line
///
/// On rejection the parser's message is printed and the prompt repeats.
///
/// # Errors
///
/// [`ConsoleError::InputClosed`] at end of input, or the I/O error.
pub fn prompt_until<C, T, F>(console: &mut C, prompt: &str, mut parse: F) -> Result<T, ConsoleError>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Result<T, String>,
{
    loop {
        let line = read_required(console, prompt)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(message) => console.write_line(&message)?,
        }
    }
}

/// Prompts until a non-blank line is entered; returns it trimmed
///
/// # Errors
///
/// [`ConsoleError::InputClosed`] at end of input, or the I/O error.
pub fn prompt_non_empty<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
) -> Result<String, ConsoleError> {
    prompt_until(console, prompt, |line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Err("Input tidak boleh kosong. Coba lagi.".to_string())
        } else {
            Ok(trimmed.to_string())
        }
    })
}

/// Prompts for a menu number in `1..=max`
///
/// # Errors
///
/// [`ConsoleError::InputClosed`] at end of input, or the I/O error.
pub fn prompt_choice<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    max: usize,
) -> Result<usize, ConsoleError> {
    prompt_until(console, prompt, |line| {
        parse_choice(line, max).ok_or_else(|| format!("Masukkan angka 1..{max} sesuai menu."))
    })
}

/// Reads one optional line, trimmed; blank means "keep the old value"
///
/// # Errors
///
/// [`ConsoleError::InputClosed`] at end of input, or the I/O error.
pub fn prompt_optional<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
) -> Result<String, ConsoleError> {
    Ok(read_required(console, prompt)?.trim().to_string())
}

/// Parses a 1-based menu number, accepting only `1..=max`
#[must_use]
pub fn parse_choice(input: &str, max: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=max).contains(choice))
}

/// Writes a numbered list, one entry per line, starting at 1
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn write_numbered<C, I, T>(console: &mut C, items: I) -> io::Result<()>
where
    C: Console + ?Sized,
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    for (i, item) in items.into_iter().enumerate() {
        console.write_line(&format!("{}. {item}", i + 1))?;
    }
    Ok(())
}
