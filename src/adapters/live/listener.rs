//! Console build log.

use tracing::error;

use crate::ports::TaskListener;

/// Prints build lines to stdout and fatal lines to stderr.
pub struct ConsoleListener;

impl TaskListener for ConsoleListener {
    fn println(&self, line: &str) {
        println!("{line}");
    }

    fn fatal_error(&self, line: &str) {
        error!(line, "build fatal error");
        eprintln!("FATAL: {line}");
    }
}
