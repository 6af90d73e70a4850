//! Per-request resource usage reporting for request-serving processes.
//!
//! This package measures what one unit of work (typically one HTTP request)
//! costs: elapsed wall-clock time, user and kernel mode processor time and
//! peak resident memory, optionally enriched with aggregated database query
//! timings supplied by an external instrumentation subsystem. At the end of
//! each unit of work it emits exactly one structured log line for a
//! downstream analyzer to rank requests by cost.
//!
//! The core types are:
//! - [`Session`] - Configures reporting and starts measurement windows
//! - [`RequestSpan`] - Measurement window for one unit of work; emits the
//!   report line when dropped
//! - [`RequestContext`] - How the unit of work was invoked, used to build
//!   its identifier
//! - [`QueryStatsProvider`] - Optional capability exposing per-query cost
//!   records
//! - [`LogSink`] - Destination for the emitted lines
//!
//! # Simple usage
//!
//! ```
//! use reqtop::{RequestContext, Session};
//!
//! let session = Session::new();
//!
//! // At the start of the unit of work:
//! let span = session.start_request(
//!     RequestContext::http("example.com", "/index").with_tls(false),
//! );
//!
//! // ... serve the request ...
//!
//! // When the span drops - on every exit path, including panics - one line
//! // like the following is written to the session's log sink:
//! //
//! //   phptop time:0.004 user:0.002 sys:0.000 mem:012M url:http://example.com/index
//! drop(span);
//! ```
//!
//! # Query instrumentation
//!
//! A host that times its database queries can expose them through
//! [`QueryStatsProvider`]; the line then carries `sqltime` (total),
//! `sqlslower` (slowest single query) and `sqlcount` fields:
//!
//! ```
//! use std::time::Duration;
//!
//! use reqtop::{QueryCostRecord, QueryStatsProvider, RequestContext, Session};
//!
//! #[derive(Debug)]
//! struct QueryLog;
//!
//! impl QueryStatsProvider for QueryLog {
//!     fn records(&self) -> Vec<QueryCostRecord> {
//!         vec![QueryCostRecord::new(Duration::from_millis(12))]
//!     }
//! }
//!
//! let session = Session::new().with_query_stats(QueryLog);
//! session.start_request(RequestContext::http("example.com", "/index")).finish();
//! ```
//!
//! # Threading
//!
//! One [`Session`] is shared by all units of work; every [`RequestSpan`]
//! owns its own baseline, so hosts that serve requests concurrently get
//! correct per-request figures without any request-local globals.
//!
//! # Accuracy
//!
//! Peak resident memory is the process-lifetime peak as reported by the
//! operating system, not a per-request figure - the counter is not reset
//! between units of work. Reporting is best-effort throughout: when a
//! counter or collaborator is unavailable the affected field degrades to a
//! zero/default value and the line is still written.

mod pal;
mod query_stats;
mod report;
mod request;
mod request_span;
mod session;
mod sink;
mod snapshot;

pub use query_stats::{QueryCostRecord, QueryStats, QueryStatsProvider};
pub use report::ReportRecord;
pub use request::{InvocationKind, RequestContext};
pub use request_span::RequestSpan;
pub use session::Session;
pub use sink::{LogFacadeSink, LogSink, StderrSink};
pub use snapshot::{ResourceDelta, ResourceSnapshot};
