//! Measurement windows for units of work.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::pal::{Platform, PlatformFacade};
use crate::{LogSink, QueryStats, QueryStatsProvider, ReportRecord, RequestContext, ResourceSnapshot};

/// The measurement window for one unit of work.
///
/// Created by [`Session::start_request`](crate::Session::start_request) at
/// the start of the unit of work; holds the baseline resource snapshot for
/// exactly that window. When the span is dropped - on every exit path,
/// including unwinding - it captures the final snapshot and emits one report
/// line. Resource consumption is most interesting for failing and slow
/// requests, so the failure paths matter as much as the happy one.
///
/// Each span owns its own baseline, so concurrent units of work in the same
/// process cannot contaminate each other's measurements.
///
/// # Examples
///
/// ```
/// use reqtop::{RequestContext, Session};
///
/// let session = Session::new();
///
/// {
///     let _span = session.start_request(RequestContext::http("example.com", "/index"));
///     // ... serve the request ...
/// } // One report line is written here.
/// ```
#[derive(Debug)]
#[must_use = "the report is emitted when the span is dropped"]
pub struct RequestSpan {
    /// `None` for inert spans (unmeasured batch invocations) and for spans
    /// that have already emitted.
    state: Option<SpanState>,
}

#[derive(Debug)]
struct SpanState {
    baseline: ResourceSnapshot,
    context: RequestContext,
    platform: PlatformFacade,
    sink: Arc<dyn LogSink>,
    query_stats: Option<Arc<dyn QueryStatsProvider>>,
    disabled: Arc<AtomicBool>,
}

impl RequestSpan {
    pub(crate) fn new(
        baseline: ResourceSnapshot,
        context: RequestContext,
        platform: PlatformFacade,
        sink: Arc<dyn LogSink>,
        query_stats: Option<Arc<dyn QueryStatsProvider>>,
        disabled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            state: Some(SpanState {
                baseline,
                context,
                platform,
                sink,
                query_stats,
                disabled,
            }),
        }
    }

    /// Creates a span that measures nothing and emits nothing.
    ///
    /// Used for batch invocations when the session is not configured to
    /// measure them, so callers can treat every unit of work uniformly.
    pub(crate) fn inert() -> Self {
        Self { state: None }
    }

    /// Whether this span will emit a report line when it ends (unless the
    /// session is disabled by then).
    #[must_use]
    pub fn is_measuring(&self) -> bool {
        self.state.is_some()
    }

    /// Ends the measurement window now, before scope exit.
    ///
    /// Equivalent to dropping the span; provided for hosts that want an
    /// explicit end-of-work call site.
    pub fn finish(self) {
        // Emission happens in Drop.
    }
}

impl Drop for RequestSpan {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            // Reporting is best-effort instrumentation: a panicking
            // collaborator must not take down the unit of work, nor turn a
            // clean unwind into an abort.
            catch_unwind(AssertUnwindSafe(|| state.emit())).ok();
        }
    }
}

impl SpanState {
    fn emit(self) {
        if self.disabled.load(Ordering::Relaxed) {
            return;
        }

        let final_snapshot = ResourceSnapshot::capture(&self.platform);
        let delta = final_snapshot.since(&self.baseline);

        // A misbehaving provider degrades to "no query fields"; it does not
        // cost us the report line.
        let query_stats = self.query_stats.as_ref().and_then(|provider| {
            catch_unwind(AssertUnwindSafe(|| provider.records()))
                .ok()
                .and_then(|records| QueryStats::aggregate(&records))
        });

        let record = ReportRecord {
            wall: delta.wall,
            user: delta.user,
            system: delta.system,
            peak_rss_bytes: self.platform.peak_rss_bytes(),
            identifier: self.context.identifier(),
            query_stats,
        };

        self.sink.write_line(&record.to_string());
    }
}
