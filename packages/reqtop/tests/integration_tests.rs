//! Integration tests for `reqtop` against the real platform.
//!
//! These tests drive whole measurement windows through real operating system
//! counters and verify the emitted line, rather than testing modules in
//! isolation.

use std::hint::black_box;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use reqtop::{LogSink, QueryCostRecord, QueryStatsProvider, RequestContext, Session};

/// Collects emitted report lines for inspection.
#[derive(Clone, Debug, Default)]
struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Performs intensive work that should be measurable as processor time.
fn perform_measurable_cpu_work() {
    let start = Instant::now();
    let mut accumulator = 0_u64;

    // Perform intensive work for at least 50ms of real time.
    while start.elapsed() < Duration::from_millis(50) {
        for i in 0..50_000_u32 {
            accumulator = accumulator
                .wrapping_add(u64::from(i))
                .wrapping_mul(3)
                .rotate_left(1);
        }
        black_box(accumulator);
    }
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn emits_parseable_line_for_real_request() {
    let sink = RecordingSink::default();
    let session = Session::new().with_sink(sink.clone());

    {
        let _span = session.start_request(RequestContext::http("example.com", "/a?b=1"));
        perform_measurable_cpu_work();
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);

    // The line has the exact field order the downstream analyzer expects.
    let fields: Vec<&str> = lines[0].split(' ').collect();
    assert_eq!(fields[0], "phptop");
    assert!(fields[1].starts_with("time:"));
    assert!(fields[2].starts_with("user:"));
    assert!(fields[3].starts_with("sys:"));
    assert!(fields[4].starts_with("mem:"));
    assert!(fields[4].ends_with('M'));
    assert_eq!(fields[5], "url:http://example.com/a?b=1");
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
#[cfg(unix)]
fn measures_nonzero_wall_and_processor_time() {
    let sink = RecordingSink::default();
    let session = Session::new().with_sink(sink.clone());

    {
        let _span = session.start_request(RequestContext::http("example.com", "/index"));
        perform_measurable_cpu_work();
    }

    let line = sink.lines().remove(0);
    let wall = field_seconds(&line, "time:");
    let user = field_seconds(&line, "user:");

    // 50ms+ of real, processor-bound work must show up in both counters.
    assert!(wall >= 0.050, "expected at least 50ms of wall time: {line}");
    assert!(user > 0.0, "expected nonzero user time: {line}");
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
#[cfg(unix)]
fn reports_nonzero_peak_memory() {
    let sink = RecordingSink::default();
    let session = Session::new().with_sink(sink.clone());

    session
        .start_request(RequestContext::http("example.com", "/index"))
        .finish();

    let line = sink.lines().remove(0);
    let mem = line
        .split(' ')
        .find_map(|field| field.strip_prefix("mem:"))
        .and_then(|value| value.strip_suffix('M'))
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap();

    // Any running process holds at least one megabyte of resident memory.
    assert!(mem >= 1, "expected nonzero peak memory: {line}");
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn query_fields_reflect_installed_provider() {
    #[derive(Debug)]
    struct FixedProvider;

    impl QueryStatsProvider for FixedProvider {
        fn records(&self) -> Vec<QueryCostRecord> {
            vec![
                QueryCostRecord::new(Duration::from_millis(100)),
                QueryCostRecord::new(Duration::from_millis(400)),
                QueryCostRecord::new(Duration::from_millis(50)),
            ]
        }
    }

    let sink = RecordingSink::default();
    let session = Session::new()
        .with_sink(sink.clone())
        .with_query_stats(FixedProvider);

    session
        .start_request(RequestContext::http("example.com", "/index"))
        .finish();

    let line = sink.lines().remove(0);
    assert!(line.contains(" sqltime:0.550 sqlslower:0.400 sqlcount:003 url:"));
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn disabled_session_stays_silent_under_load() {
    let sink = RecordingSink::default();
    let session = Session::new().with_sink(sink.clone());
    session.set_disabled(true);

    for _ in 0..10 {
        let _span = session.start_request(RequestContext::http("example.com", "/index"));
    }

    assert!(sink.lines().is_empty());
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn concurrent_requests_each_emit_their_own_line() {
    let sink = RecordingSink::default();
    let session = Arc::new(Session::new().with_sink(sink.clone()));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                let context = RequestContext::http("example.com", format!("/worker/{worker}"));
                let _span = session.start_request(context);
                perform_measurable_cpu_work();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 4);
    for worker in 0..4 {
        assert!(
            lines
                .iter()
                .any(|line| line.ends_with(&format!("url:http://example.com/worker/{worker}"))),
            "missing line for worker {worker}: {lines:?}"
        );
    }
}

/// Extracts a `token:<seconds>` field value from a report line.
#[cfg(unix)]
fn field_seconds(line: &str, token: &str) -> f64 {
    line.split(' ')
        .find_map(|field| field.strip_prefix(token))
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or_else(|| panic!("field {token} missing from line: {line}"))
}
