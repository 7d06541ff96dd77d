//! User-facing output handle
//!
//! Executors never print directly; they write through the [`Console`] they
//! are handed, which goes to the terminal in the binary and to an in-memory
//! buffer in tests.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Sink {
    Terminal,
    Capture(Arc<Mutex<Vec<String>>>),
}

#[derive(Debug, Clone)]
pub struct Console {
    sink: Sink,
    verbose: bool,
}

/// Output captured by a [`Console::capture`] console
#[derive(Debug, Clone)]
pub struct CapturedOutput(Arc<Mutex<Vec<String>>>);

impl CapturedOutput {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }
}

impl Console {
    pub fn terminal(verbose: bool) -> Self {
        Self {
            sink: Sink::Terminal,
            verbose,
        }
    }

    pub fn capture() -> (Self, CapturedOutput) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            sink: Sink::Capture(buffer.clone()),
            verbose: false,
        };
        (console, CapturedOutput(buffer))
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn push(&self, buffer: &Mutex<Vec<String>>, message: &str) {
        if let Ok(mut lines) = buffer.lock() {
            lines.push(message.to_string());
        }
    }

    /// Regular output (stdout).
    pub fn line(&self, message: impl AsRef<str>) {
        match &self.sink {
            Sink::Terminal => println!("{}", message.as_ref()),
            Sink::Capture(buffer) => self.push(buffer, message.as_ref()),
        }
    }

    /// Failure report (stderr).
    pub fn failure(&self, message: impl AsRef<str>) {
        log::debug!("reported failure: {}", message.as_ref());
        match &self.sink {
            Sink::Terminal => eprintln!("{}", message.as_ref()),
            Sink::Capture(buffer) => self.push(buffer, message.as_ref()),
        }
    }

    /// Diagnostic detail, only visible with verbose logging.
    pub fn debug(&self, context: &str, detail: &dyn Debug) {
        log::debug!("{}: {:?}", context, detail);
    }
}
