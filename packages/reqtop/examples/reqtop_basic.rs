//! Simplified example demonstrating key `reqtop` types working together.
//!
//! This example simulates a small request-serving process:
//! - `Session`: created once at process start
//! - `RequestContext`: describes each incoming request
//! - `RequestSpan`: measures one request and emits the report line on drop
//! - `QueryStatsProvider`: exposes database query timings for the `sql*`
//!   fields
//!
//! Run with: `cargo run --example reqtop_basic` (report lines appear on
//! stderr).

use std::fmt::Write;
use std::hint::black_box;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqtop::{QueryCostRecord, QueryStatsProvider, RequestContext, Session};

/// A toy query instrumentation subsystem: the "database layer" pushes one
/// record per executed query, and the reporter reads them back at the end of
/// the request.
#[derive(Debug, Default)]
struct QueryLog {
    records: Mutex<Vec<QueryCostRecord>>,
}

impl QueryLog {
    fn record(&self, duration: Duration) {
        self.records.lock().unwrap().push(QueryCostRecord::new(duration));
    }
}

impl QueryStatsProvider for &'static QueryLog {
    fn begin_request(&self) {
        self.records.lock().unwrap().clear();
    }

    fn records(&self) -> Vec<QueryCostRecord> {
        self.records.lock().unwrap().clone()
    }
}

static QUERY_LOG: QueryLog = QueryLog {
    records: Mutex::new(Vec::new()),
};

fn main() {
    println!("=== Per-request resource reporting example ===");
    println!();

    // Created once, when the host process starts.
    let session = Session::new().with_query_stats(&QUERY_LOG);
    println!("✓ Created reporting session");

    // Request 1: a page that runs a few "database queries".
    {
        let _span = session.start_request(RequestContext::http("example.com", "/index"));

        simulate_work(Duration::from_millis(30));
        QUERY_LOG.record(Duration::from_millis(12));
        QUERY_LOG.record(Duration::from_millis(4));
    } // Report line emitted here.
    println!("✓ Served /index (2 queries)");

    // Request 2: a TLS request with no database work.
    {
        let _span = session.start_request(
            RequestContext::http("example.com", "/static/logo.png").with_tls(true),
        );

        simulate_work(Duration::from_millis(5));
    }
    println!("✓ Served /static/logo.png (no queries)");

    // An unattended batch job: produces no output by default.
    {
        let _span = session.start_request(RequestContext::batch("/usr/local/bin/nightly-import"));
        simulate_work(Duration::from_millis(10));
    }
    println!("✓ Ran nightly import (not measured: batch invocation)");

    println!();
    println!("Report lines were written to stderr, one per measured request.");
}

/// Burns processor time for roughly the given duration.
fn simulate_work(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        let mut buffer = String::new();
        for i in 0..100 {
            write!(buffer, "{i:04x}").unwrap();
        }
        black_box(buffer);
    }
}
