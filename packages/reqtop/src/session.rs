//! Session configuration and measurement entry point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::pal::PlatformFacade;
use crate::sink::StderrSink;
use crate::{LogSink, QueryStatsProvider, RequestContext, RequestSpan, ResourceSnapshot};

/// Configures per-request resource reporting and starts measurement windows.
///
/// A host creates one `Session` at process start and uses it for every unit
/// of work it serves. The session owns the shared configuration - the log
/// sink, the optional query instrumentation provider, the enable/disable
/// flag and the batch policy - while each [`RequestSpan`] owns the baseline
/// of its own measurement window.
///
/// # Examples
///
/// ```
/// use reqtop::{RequestContext, Session};
///
/// let session = Session::new();
///
/// // At the start of each unit of work:
/// let span = session.start_request(RequestContext::http("example.com", "/index"));
///
/// // ... serve the request ...
///
/// // One report line is written when the span drops, even on error paths.
/// drop(span);
/// ```
///
/// # Threading
///
/// The session is `Send + Sync` and can be shared across the worker threads
/// of a thread-pool host; spans are independent of each other, so concurrent
/// units of work do not contaminate each other's baselines.
#[derive(Debug)]
pub struct Session {
    platform: PlatformFacade,
    sink: Arc<dyn LogSink>,
    query_stats: Option<Arc<dyn QueryStatsProvider>>,
    disabled: Arc<AtomicBool>,
    measure_batch: bool,
}

impl Session {
    /// Creates a session that reports to the process standard error stream.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            platform,
            sink: Arc::new(StderrSink),
            query_stats: None,
            disabled: Arc::new(AtomicBool::new(false)),
            measure_batch: false,
        }
    }

    /// Replaces the log sink that report lines are written to.
    #[must_use]
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Installs the query instrumentation provider whose cost records are
    /// aggregated into the `sql*` fields of each report line.
    #[must_use]
    pub fn with_query_stats(mut self, provider: impl QueryStatsProvider + 'static) -> Self {
        self.query_stats = Some(Arc::new(provider));
        self
    }

    /// Controls whether unattended batch/CLI invocations are measured.
    ///
    /// Off by default: batch units of work get an inert span, so unattended
    /// jobs produce no output at all. Turning this on measures batch
    /// invocations exactly like requests, with the script path as the
    /// identifier.
    #[must_use]
    pub fn measure_batch_invocations(mut self, measure: bool) -> Self {
        self.measure_batch = measure;
        self
    }

    /// Suppresses (or re-enables) report emission.
    ///
    /// The flag is checked when a span ends: while set, spans perform no
    /// final snapshot, no computation and no log write. Starting a span is
    /// still cheap, so hosts may flip this at any time.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }

    /// Whether report emission is currently suppressed.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Starts the measurement window for one unit of work.
    ///
    /// Captures the baseline resource snapshot and, when a query
    /// instrumentation provider is installed, signals it to begin collecting
    /// cost records. The returned span emits the report line when it ends.
    ///
    /// Batch invocations return an inert span unless
    /// [`measure_batch_invocations`](Self::measure_batch_invocations) was
    /// turned on.
    pub fn start_request(&self, context: RequestContext) -> RequestSpan {
        if context.is_batch() && !self.measure_batch {
            return RequestSpan::inert();
        }

        if let Some(provider) = &self.query_stats {
            provider.begin_request();
        }

        let baseline = ResourceSnapshot::capture(&self.platform);

        RequestSpan::new(
            baseline,
            context,
            self.platform.clone(),
            Arc::clone(&self.sink),
            self.query_stats.clone(),
            Arc::clone(&self.disabled),
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
