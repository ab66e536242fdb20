//! # SIPK Testing
//!
//! Testing utilities and helpers for the SIPK reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A scripted console for driving whole shell sessions
//! - [`ReducerTest`], a Given-When-Then runner for reducers
//!
//! ## Example
//!
//! ```ignore
//! use sipk_testing::mocks::ScriptedConsole;
//!
//! let mut console = ScriptedConsole::new(["1", "alice", "rahasia"]);
//! run_session(&mut console)?;
//! assert!(console.output().contains("berhasil"));
//! ```

use chrono::{DateTime, Utc};
use sipk_core::environment::Clock;

/// Ergonomic reducer testing
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use sipk_runtime::console::Console;
    use std::collections::VecDeque;
    use std::io;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use sipk_testing::mocks::FixedClock;
    /// use sipk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Console that replays scripted input and records everything shown
    ///
    /// Prompts are recorded inline with written lines, in order, so
    /// `output()` reads like the terminal transcript minus the typed input.
    /// Once the script runs out, `read_line` reports end of input.
    #[derive(Debug, Default, Clone)]
    pub struct ScriptedConsole {
        input: VecDeque<String>,
        transcript: Vec<String>,
        prompts: Vec<String>,
    }

    impl ScriptedConsole {
        /// Create a console that will answer prompts with `lines`, in order
        pub fn new<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                input: lines.into_iter().map(Into::into).collect(),
                transcript: Vec::new(),
                prompts: Vec::new(),
            }
        }

        /// Everything written so far (prompts and lines), newline separated
        #[must_use]
        pub fn output(&self) -> String {
            self.transcript.join("\n")
        }

        /// Every prompt shown, in order
        #[must_use]
        pub fn prompts(&self) -> &[String] {
            &self.prompts
        }

        /// Number of scripted lines not yet consumed
        #[must_use]
        pub fn remaining_input(&self) -> usize {
            self.input.len()
        }

        /// How many transcript entries (prompts included) equal `line` exactly
        #[must_use]
        pub fn count_line(&self, line: &str) -> usize {
            self.transcript.iter().filter(|l| l.as_str() == line).count()
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            self.transcript.push(prompt.to_string());
            Ok(self.input.pop_front())
        }

        fn write_line(&mut self, line: &str) -> io::Result<()> {
            self.transcript.extend(line.split('\n').map(str::to_string));
            Ok(())
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, ScriptedConsole};
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::*;
    use sipk_runtime::console::{prompt_choice, prompt_non_empty, ConsoleError};

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn scripted_console_records_retries() {
        let mut console = ScriptedConsole::new(["", "  ", " Budi "]);
        let name = prompt_non_empty(&mut console, "Nama: ").unwrap();

        assert_eq!(name, "Budi");
        assert_eq!(console.prompts().len(), 3);
        assert_eq!(console.count_line("Input tidak boleh kosong. Coba lagi."), 2);
        assert_eq!(console.remaining_input(), 0);
    }

    #[test]
    fn count_line_sees_prompts_and_output() {
        let mut console = ScriptedConsole::new(["x", "2"]);
        let choice = prompt_choice(&mut console, "Pilihan: ", 2).unwrap();

        assert_eq!(choice, 2);
        assert_eq!(console.count_line("Pilihan: "), 2);
        assert_eq!(console.count_line("Masukkan angka 1..2 sesuai menu."), 1);
    }

    #[test]
    fn scripted_console_reports_end_of_input() {
        let mut console = ScriptedConsole::new(["9"]);
        let result = prompt_choice(&mut console, "Pilih menu (1-3): ", 3);

        assert!(matches!(result, Err(ConsoleError::InputClosed)));
        assert!(console.output().contains("Masukkan angka 1..3 sesuai menu."));
    }
}
