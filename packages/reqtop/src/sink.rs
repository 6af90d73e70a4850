//! Log sinks for emitted report lines.

use std::fmt::Debug;
use std::io::Write;

/// Destination for emitted report lines.
///
/// One line is written per measured unit of work. Implementations must not
/// panic and must not block beyond what an ordinary log write does; the
/// write happens on the request's own execution path.
pub trait LogSink: Debug + Send + Sync {
    /// Writes one complete report line. The line carries no trailing
    /// newline; the sink appends whatever framing its destination needs.
    fn write_line(&self, line: &str);
}

/// Writes report lines to the process standard error stream.
///
/// This matches the traditional destination for diagnostic output in
/// request-serving processes, where stderr ends up in the server's error
/// log.
#[derive(Debug, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stderr output reliably - manually tested.
    fn write_line(&self, line: &str) {
        // A failed diagnostic write must not disturb the workload.
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}").ok();
    }
}

/// Forwards report lines through the `log` facade at info level, under the
/// `reqtop` target.
///
/// Useful for hosts that already route their diagnostics through a `log`
/// backend. Note that backends usually prepend their own metadata to each
/// line; the downstream analyzer only requires that the `phptop …` payload
/// survives as one line.
#[derive(Debug, Default)]
pub struct LogFacadeSink;

impl LogSink for LogFacadeSink {
    fn write_line(&self, line: &str) {
        log::info!(target: "reqtop", "{line}");
    }
}

/// Captures report lines in memory for inspection.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct CaptureSink {
    lines: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl CaptureSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The lines captured so far, in emission order.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .expect("CaptureSink lines lock should not be poisoned")
            .clone()
    }
}

#[cfg(test)]
impl LogSink for CaptureSink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .expect("CaptureSink lines lock should not be poisoned")
            .push(line.to_string());
    }
}
