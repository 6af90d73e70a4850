//! Report records and their wire format.

use std::fmt;
use std::time::Duration;

use crate::QueryStats;

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// The one-line summary emitted at the end of a measured unit of work.
///
/// The `Display` implementation produces the wire format consumed by the
/// downstream log analyzer:
///
/// ```text
/// phptop time:0.250 user:0.100 sys:0.020 mem:003M url:http://example.com/index
/// ```
///
/// with an optional `sqltime:… sqlslower:… sqlcount:…` triple between the
/// `mem:` and `url:` fields when query statistics are present. Field order
/// and token spelling are part of that contract and must not change.
///
/// Records are transient: computed once at emission time, handed to the log
/// sink and then discarded.
#[derive(Clone, Debug)]
pub struct ReportRecord {
    /// Elapsed wall-clock time.
    pub wall: Duration,

    /// Elapsed user-mode processor time.
    pub user: Duration,

    /// Elapsed kernel-mode processor time.
    pub system: Duration,

    /// Peak resident set size of the process, in bytes.
    ///
    /// This is the process-lifetime peak, not a per-request figure; the
    /// operating system does not reset the counter between units of work.
    /// A known, accepted imprecision in long-lived hosts.
    pub peak_rss_bytes: u64,

    /// The request URL or script path this record describes.
    pub identifier: String,

    /// Aggregated query costs, when an instrumentation subsystem reported
    /// any. `None` omits the `sql*` fields entirely.
    pub query_stats: Option<QueryStats>,
}

impl ReportRecord {
    /// Peak resident memory in whole megabytes, rounded up.
    fn peak_megabytes(&self) -> u64 {
        self.peak_rss_bytes.div_ceil(BYTES_PER_MEGABYTE)
    }
}

impl fmt::Display for ReportRecord {
    // Rust's formatting machinery always uses `.` as the decimal separator,
    // independent of the host locale, as the wire format requires.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phptop time:{:.3} user:{:.3} sys:{:.3} mem:{:03}M",
            self.wall.as_secs_f64(),
            self.user.as_secs_f64(),
            self.system.as_secs_f64(),
            self.peak_megabytes(),
        )?;

        if let Some(stats) = &self.query_stats {
            write!(
                f,
                " sqltime:{:.3} sqlslower:{:.3} sqlcount:{:03}",
                stats.total.as_secs_f64(),
                stats.slowest.as_secs_f64(),
                stats.count,
            )?;
        }

        write!(f, " url:{}", self.identifier)
    }
}
