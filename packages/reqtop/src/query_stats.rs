//! Query cost records and their aggregation.

use std::fmt::Debug;
use std::time::Duration;

/// The cost of one sub-operation (typically one database query) performed
/// during a unit of work.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryCostRecord {
    /// How long the sub-operation took.
    pub duration: Duration,
}

impl QueryCostRecord {
    /// Creates a record for a sub-operation that took `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

/// Aggregated view over the query cost records of one unit of work.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QueryStats {
    /// Number of records in the sequence.
    pub count: usize,

    /// Sum of all record durations.
    pub total: Duration,

    /// Duration of the slowest record.
    pub slowest: Duration,
}

impl QueryStats {
    /// Aggregates an ordered sequence of query cost records.
    ///
    /// Returns `None` for an empty sequence; an absent or idle
    /// instrumentation subsystem produces no `sql*` fields in the report
    /// line rather than a zero-valued triple.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use reqtop::{QueryCostRecord, QueryStats};
    ///
    /// let records = [
    ///     QueryCostRecord::new(Duration::from_millis(100)),
    ///     QueryCostRecord::new(Duration::from_millis(400)),
    ///     QueryCostRecord::new(Duration::from_millis(50)),
    /// ];
    ///
    /// let stats = QueryStats::aggregate(&records).unwrap();
    /// assert_eq!(stats.count, 3);
    /// assert_eq!(stats.total, Duration::from_millis(550));
    /// assert_eq!(stats.slowest, Duration::from_millis(400));
    /// ```
    #[must_use]
    pub fn aggregate(records: &[QueryCostRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut total = Duration::ZERO;
        let mut slowest = Duration::ZERO;

        for record in records {
            total = total.saturating_add(record.duration);
            slowest = slowest.max(record.duration);
        }

        Some(Self {
            count: records.len(),
            total,
            slowest,
        })
    }
}

/// Capability implemented by an external query instrumentation subsystem.
///
/// The reporting core calls this defensively: a host that installs no
/// provider simply gets report lines without `sql*` fields, which is a
/// normal, zero-cost case rather than an error.
pub trait QueryStatsProvider: Debug + Send + Sync {
    /// Called when a measured unit of work starts, so the subsystem can
    /// begin collecting cost records for it.
    ///
    /// The default implementation does nothing, for subsystems that collect
    /// continuously.
    fn begin_request(&self) {}

    /// The cost records accrued during the current unit of work, in the
    /// order the sub-operations completed.
    fn records(&self) -> Vec<QueryCostRecord>;
}
