//! Per-proxy derived metrics
//!
//! Each cycle turns a current record, its previous record (if any) and the
//! shared elapsed time into the fixed set of reported values.

use super::rate::{rate_of, ratio_of, scaled_rate_of};
use crate::constants::output::DOWNTIME_SCALE;
use crate::stats::{Field, ProxyRecord};
use std::fmt;
use std::time::Duration;

/// Names of the emitted metrics, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RequestsQueued,
    RequestsQueueLimit,
    RequestsHandled,
    RequestsAbortedByClient,
    RequestsAbortedByServer,
    Sessions,
    SessionLimit,
    BytesIn,
    BytesOut,
    Warnings,
    Errors,
    FailedHealthChecks,
    DowntimeSeconds,
    Responses1xx,
    Responses2xx,
    Responses3xx,
    Responses4xx,
    Responses5xx,
    ResponsesOther,
}

impl MetricName {
    /// Every metric in emission order
    pub const ALL: [MetricName; 19] = [
        Self::RequestsQueued,
        Self::RequestsQueueLimit,
        Self::RequestsHandled,
        Self::RequestsAbortedByClient,
        Self::RequestsAbortedByServer,
        Self::Sessions,
        Self::SessionLimit,
        Self::BytesIn,
        Self::BytesOut,
        Self::Warnings,
        Self::Errors,
        Self::FailedHealthChecks,
        Self::DowntimeSeconds,
        Self::Responses1xx,
        Self::Responses2xx,
        Self::Responses3xx,
        Self::Responses4xx,
        Self::Responses5xx,
        Self::ResponsesOther,
    ];

    /// Wire name of the metric
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestsQueued => "HAPROXY_REQUESTS_QUEUED",
            Self::RequestsQueueLimit => "HAPROXY_REQUESTS_QUEUE_LIMIT",
            Self::RequestsHandled => "HAPROXY_REQUESTS_HANDLED",
            Self::RequestsAbortedByClient => "HAPROXY_REQUESTS_ABORTED_BY_CLIENT",
            Self::RequestsAbortedByServer => "HAPROXY_REQUESTS_ABORTED_BY_SERVER",
            Self::Sessions => "HAPROXY_SESSIONS",
            Self::SessionLimit => "HAPROXY_SESSION_LIMIT",
            Self::BytesIn => "HAPROXY_BYTES_IN",
            Self::BytesOut => "HAPROXY_BYTES_OUT",
            Self::Warnings => "HAPROXY_WARNINGS",
            Self::Errors => "HAPROXY_ERRORS",
            Self::FailedHealthChecks => "HAPROXY_FAILED_HEALTH_CHECKS",
            Self::DowntimeSeconds => "HAPROXY_DOWNTIME_SECONDS",
            Self::Responses1xx => "HAPROXY_1XX_RESPONSES",
            Self::Responses2xx => "HAPROXY_2XX_RESPONSES",
            Self::Responses3xx => "HAPROXY_3XX_RESPONSES",
            Self::Responses4xx => "HAPROXY_4XX_RESPONSES",
            Self::Responses5xx => "HAPROXY_5XX_RESPONSES",
            Self::ResponsesOther => "HAPROXY_OTHER_RESPONSES",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a derived metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Gauge or per-second rate
    Count(i64),
    /// Fraction of a configured limit
    Ratio(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(value) => write!(f, "{}", value),
            Self::Ratio(value) => write!(f, "{}", value),
        }
    }
}

const WARNING_FIELDS: &[Field] = &[Field::WRetr, Field::WRedis];
const ERROR_FIELDS: &[Field] = &[Field::EReq, Field::ECon, Field::EResp];

/// Derived metrics for one proxy in one cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub requests_queued: i64,
    pub queue_limit_ratio: f64,
    pub requests_handled: i64,
    pub aborted_by_client: i64,
    pub aborted_by_server: i64,
    pub sessions: i64,
    pub session_limit_ratio: f64,
    pub bytes_in: i64,
    pub bytes_out: i64,
    pub warnings: i64,
    pub errors: i64,
    pub failed_health_checks: i64,
    /// Milliseconds of downtime per second of wall time
    pub downtime: i64,
    pub responses_1xx: i64,
    pub responses_2xx: i64,
    pub responses_3xx: i64,
    pub responses_4xx: i64,
    pub responses_5xx: i64,
    pub responses_other: i64,
}

impl DerivedMetrics {
    /// Derive metrics for `current` against `previous`
    ///
    /// A missing previous record (proxy new since the last cycle) yields zero
    /// rates; gauges and ratios only read `current`. Inputs are not modified.
    #[must_use]
    pub fn derive(
        current: &ProxyRecord,
        previous: Option<&ProxyRecord>,
        elapsed: Option<Duration>,
    ) -> Self {
        let rate = |field: Field| {
            rate_of(
                current.int(field),
                previous.and_then(|prev| prev.int(field)),
                elapsed,
            )
        };
        let summed_rate = |fields: &[Field]| {
            rate_of(
                current.sum(fields),
                previous.and_then(|prev| prev.sum(fields)),
                elapsed,
            )
        };

        Self {
            requests_queued: current.int(Field::QCur).unwrap_or(0),
            queue_limit_ratio: ratio_of(current.int(Field::QCur), current.int(Field::QLimit)),
            requests_handled: rate(Field::ReqTot),
            aborted_by_client: rate(Field::CliAbrt),
            aborted_by_server: rate(Field::SrvAbrt),
            sessions: current.int(Field::SCur).unwrap_or(0),
            session_limit_ratio: ratio_of(current.int(Field::SCur), current.int(Field::SLim)),
            bytes_in: rate(Field::BIn),
            bytes_out: rate(Field::BOut),
            warnings: summed_rate(WARNING_FIELDS),
            errors: summed_rate(ERROR_FIELDS),
            failed_health_checks: rate(Field::ChkFail),
            downtime: scaled_rate_of(
                current.int(Field::Downtime),
                previous.and_then(|prev| prev.int(Field::Downtime)),
                elapsed,
                DOWNTIME_SCALE,
            ),
            responses_1xx: rate(Field::Hrsp1xx),
            responses_2xx: rate(Field::Hrsp2xx),
            responses_3xx: rate(Field::Hrsp3xx),
            responses_4xx: rate(Field::Hrsp4xx),
            responses_5xx: rate(Field::Hrsp5xx),
            responses_other: rate(Field::HrspOther),
        }
    }

    /// Value of a single metric
    #[must_use]
    pub fn get(&self, name: MetricName) -> MetricValue {
        use MetricValue::{Count, Ratio};

        match name {
            MetricName::RequestsQueued => Count(self.requests_queued),
            MetricName::RequestsQueueLimit => Ratio(self.queue_limit_ratio),
            MetricName::RequestsHandled => Count(self.requests_handled),
            MetricName::RequestsAbortedByClient => Count(self.aborted_by_client),
            MetricName::RequestsAbortedByServer => Count(self.aborted_by_server),
            MetricName::Sessions => Count(self.sessions),
            MetricName::SessionLimit => Ratio(self.session_limit_ratio),
            MetricName::BytesIn => Count(self.bytes_in),
            MetricName::BytesOut => Count(self.bytes_out),
            MetricName::Warnings => Count(self.warnings),
            MetricName::Errors => Count(self.errors),
            MetricName::FailedHealthChecks => Count(self.failed_health_checks),
            MetricName::DowntimeSeconds => Count(self.downtime),
            MetricName::Responses1xx => Count(self.responses_1xx),
            MetricName::Responses2xx => Count(self.responses_2xx),
            MetricName::Responses3xx => Count(self.responses_3xx),
            MetricName::Responses4xx => Count(self.responses_4xx),
            MetricName::Responses5xx => Count(self.responses_5xx),
            MetricName::ResponsesOther => Count(self.responses_other),
        }
    }

    /// All metrics in emission order
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, MetricValue)> + '_ {
        MetricName::ALL.iter().map(|&name| (name, self.get(name)))
    }
}
