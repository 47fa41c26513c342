use std::error::Error;
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::debug;

enum Sink {
    Stderr,
    Memory(Vec<String>),
}

/// Writes diagnostics prefixed with the invoking program name.
///
/// Every line has the shape `PROGRAM: message[: cause]...`, where the causes
/// are the error's source chain (typically the OS error of a failed syscall).
pub struct Reporter {
    program: String,
    sink: Sink,
    emitted: usize,
}

impl Reporter {
    /// Reporter printing to the standard error stream.
    pub fn stderr(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            sink: Sink::Stderr,
            emitted: 0,
        }
    }

    /// Reporter keeping its lines in memory, for callers that inspect them.
    pub fn in_memory(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            sink: Sink::Memory(Vec::new()),
            emitted: 0,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Number of diagnostics reported so far.
    pub fn count(&self) -> usize {
        self.emitted
    }

    /// Lines captured by an in-memory reporter (always empty for stderr).
    pub fn lines(&self) -> &[String] {
        match &self.sink {
            Sink::Memory(lines) => lines.as_slice(),
            Sink::Stderr => &[],
        }
    }

    /// Formats `err` and its source chain into one diagnostic line.
    pub fn format(&self, err: &(dyn Error + 'static)) -> String {
        let mut line = format!("{}: {err}", self.program);
        let mut cause = err.source();
        while let Some(inner) = cause {
            let _ = write!(line, ": {inner}");
            cause = inner.source();
        }
        line
    }

    /// Reports an error as one diagnostic line.
    pub fn report(&mut self, err: &(dyn Error + 'static)) {
        let line = self.format(err);
        self.emit(line);
    }

    /// Reports a free-form message, such as the usage text.
    pub fn message(&mut self, msg: &str) {
        let line = format!("{}: {msg}", self.program);
        self.emit(line);
    }

    fn emit(&mut self, line: String) {
        debug!(diagnostic = %line, "Diagnostic reported");
        self.emitted += 1;
        match &mut self.sink {
            Sink::Stderr => {
                // Nothing sensible is left to do if stderr itself is gone.
                let _ = writeln!(io::stderr().lock(), "{line}");
            }
            Sink::Memory(lines) => lines.push(line),
        }
    }
}
