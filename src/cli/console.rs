//! Character sinks for the CLI and the output logger.

use std::io::Write;

/// Where user-facing text goes. Distinct from the `log` facade: console
/// output is part of a binding's observable behaviour and is matched
/// verbatim by the test suite.
pub trait Console {
    fn print(&mut self, text: &str);

    fn println(&mut self, line: &str) {
        self.print(line);
        self.print("\n");
    }
}

/// Console writing straight to stdout, flushed per call so prompts appear
/// without a trailing newline.
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn print(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Console capturing everything into a string, for tests.
#[derive(Default)]
pub struct TestConsole {
    pub output: String,
}

impl TestConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything printed so far.
    pub fn take(&mut self) -> String {
        core::mem::take(&mut self.output)
    }
}

impl Console for TestConsole {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }
}
